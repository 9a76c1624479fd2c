#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{Parser, Subcommand};
    use folio_interact::config::{self, CONFIG_FILE};
    use folio_interact::output;
    use folio_interact::styles;
    use folio_interact::submission::{self, SubmitError};
    use folio_interact::transport::HttpTransport;
    use std::path::PathBuf;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser)]
    #[command(name = "folio")]
    #[command(about = "Tooling for the folio-interact page script")]
    #[command(long_about = "\
Tooling for the folio-interact page script

The browser build reads its settings from an inline block in the page:

  <script type=\"text/toml\" id=\"folio-config\">
  [form]
  fallback_email = \"me@example.com\"
  </script>

The same TOML can live in folio.toml next to the site, where these commands
validate it, render the injected stylesheet, and probe the form endpoint.

Run 'folio gen-config' to generate a documented folio.toml.")]
    #[command(version)]
    struct Cli {
        /// Directory containing folio.toml
        #[arg(long, default_value = ".", global = true)]
        config: PathBuf,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print a stock folio.toml with all options documented
        GenConfig,
        /// Load and validate folio.toml, then summarize it
        Check,
        /// Print the stylesheet the page script injects
        Styles,
        /// Submit a field set to a form endpoint and report the outcome
        Probe {
            /// Endpoint URL (defaults to form.endpoint from folio.toml)
            #[arg(long)]
            endpoint: Option<String>,
            /// Form field as name=value (repeatable)
            #[arg(long = "field", value_parser = parse_field)]
            fields: Vec<(String, String)>,
        },
    }

    fn parse_field(raw: &str) -> Result<(String, String), String> {
        match raw.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(format!("expected name=value, got '{raw}'")),
        }
    }

    fn init_logging() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("folio_interact=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();
        init_logging();

        match cli.command {
            Command::GenConfig => {
                print!("{}", config::stock_config_toml());
            }
            Command::Check => {
                println!("==> Checking {}", cli.config.display());
                let site_config = config::load_config(&cli.config)?;
                let path = cli.config.join(CONFIG_FILE);
                let source = path.exists().then_some(path.as_path());
                output::print_check_output(&site_config, source);
                println!("==> Config is valid");
            }
            Command::Styles => {
                let site_config = config::load_config(&cli.config)?;
                print!("{}", styles::generate_css(&site_config.colors));
            }
            Command::Probe { endpoint, fields } => {
                let site_config = config::load_config(&cli.config)?;
                let endpoint = endpoint
                    .or(site_config.form.endpoint.clone())
                    .ok_or("no endpoint: pass --endpoint or set form.endpoint in folio.toml")?;
                let timeout = site_config.form.timeout();

                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                let transport = HttpTransport::new();
                let outcome = runtime.block_on(async {
                    tokio::time::timeout(timeout, submission::submit(&transport, &endpoint, &fields))
                        .await
                        .unwrap_or(Err(SubmitError::Timeout(timeout)))
                });

                output::print_probe_output(&endpoint, fields.len(), &outcome);
                outcome?;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn field_parsing() {
            assert_eq!(
                parse_field("email=a@b.c"),
                Ok(("email".to_string(), "a@b.c".to_string()))
            );
            assert_eq!(
                parse_field("message=a=b"),
                Ok(("message".to_string(), "a=b".to_string()))
            );
            assert_eq!(parse_field("empty="), Ok(("empty".to_string(), String::new())));
            assert!(parse_field("novalue").is_err());
            assert!(parse_field("=x").is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli::run()
}

// The browser build enters through the library's start function.
#[cfg(target_arch = "wasm32")]
fn main() {}
