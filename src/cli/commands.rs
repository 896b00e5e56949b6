use clap::Subcommand;

#[derive(Subcommand)]
pub enum DomainCommands {
    /// Add a new domain
    Add {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Name for the new domain
        #[arg(long)]
        name: Option<String>,

        /// Skip interactive prompts (requires --name)
        #[arg(long)]
        non_interactive: bool,
    },

    /// List domains
    List {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a domain that has no sources
    Remove {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Name of the domain to remove
        #[arg(long)]
        name: Option<String>,

        /// Skip interactive prompts (requires --name)
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum LanguageCommands {
    /// Add a new language
    Add {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Human readable name, e.g. "French"
        #[arg(long)]
        name: Option<String>,

        /// Locale code used by lookups, e.g. "fr"
        #[arg(long)]
        code: Option<String>,

        /// Skip interactive prompts (requires --name and --code)
        #[arg(long)]
        non_interactive: bool,
    },

    /// List languages
    List {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a language that has no translations
    Remove {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Code of the language to remove
        #[arg(long)]
        code: Option<String>,

        /// Skip interactive prompts (requires --code)
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SourceCommands {
    /// Add a source string, optionally with translations
    Add {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Unique key, e.g. PRE_AUTH
        #[arg(long)]
        key: Option<String>,

        /// Canonical text
        #[arg(long)]
        text: Option<String>,

        /// Domain name
        #[arg(long)]
        domain: Option<String>,

        /// Translation as CODE=TEXT, repeatable
        #[arg(long = "translation", value_name = "CODE=TEXT")]
        translations: Vec<String>,

        /// Author recorded on the source and its translations
        #[arg(long)]
        created_by: Option<String>,

        /// Skip interactive prompts (requires --key, --text and --domain)
        #[arg(long)]
        non_interactive: bool,
    },

    /// List sources
    List {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Only sources in this domain
        #[arg(long)]
        domain: Option<String>,

        /// Only sources translated into this language code
        #[arg(long)]
        language: Option<String>,

        /// Case-insensitive match on key, text or domain name
        #[arg(long)]
        search: Option<String>,

        /// Sort column: key, text, domain, created_at, updated_at
        #[arg(long, default_value = "key")]
        sort: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,

        /// Sources per page
        #[arg(long, default_value = "15")]
        per_page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a source with its translations
    Show {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a source's text or domain
    Edit {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        key: String,

        /// New canonical text
        #[arg(long)]
        text: Option<String>,

        /// New domain name
        #[arg(long)]
        domain: Option<String>,
    },

    /// Remove a source and all of its translations
    Remove {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        key: String,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TranslationCommands {
    /// Create or replace the translation of a source in one language
    Set {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        #[arg(long)]
        key: String,

        /// Language code
        #[arg(long)]
        code: String,

        /// Translated text
        #[arg(long)]
        text: String,

        /// Author recorded on a new translation
        #[arg(long)]
        created_by: Option<String>,
    },

    /// Remove the translation of a source in one language
    Remove {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Source key
        #[arg(long)]
        key: String,

        /// Language code
        #[arg(long)]
        code: String,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
