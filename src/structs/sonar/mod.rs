pub mod issues_search_response;
