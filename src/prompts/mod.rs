pub mod issue_prompt;
