pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Config {
        #[serde(default = "default_port")]
        pub port: u16,
        /// Owner id assumed when a request carries no identity header.
        /// Placeholder for a real authentication collaborator.
        #[serde(default = "default_owner")]
        pub default_owner: String,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_owner() -> String {
        "default-user".to_string()
    }
}

pub mod auth;
pub mod task;
pub mod web;
