use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Start the HTTP API
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
    },
    /// Run one analysis from the terminal
    Analyze {
        #[clap(short, long)]
        project: String,
        #[clap(short, long)]
        issue: Option<String>,
        /// Comma-separated issue types, e.g. BUG,VULNERABILITY
        #[clap(short, long)]
        types: Option<String>,
    },
    /// Load and check the configuration
    Validate,
}
