use clap::Parser;
use tracing::warn;

/// Post-touchdown try win probabilities
#[derive(Parser, Debug, Clone)]
#[command(name = "try-wp", version, about)]
pub struct Config {
    /// JSON observation file ("-" reads stdin)
    #[arg(long, env = "TRY_WP_OBSERVATION", default_value = "-")]
    pub observation: String,

    /// Leader's point lead right after the touchdown, before the try.
    /// Overrides `base_margin` in the observation.
    #[arg(long, env = "TRY_WP_BASE_MARGIN", allow_hyphen_values = true)]
    pub base_margin: Option<i32>,

    /// Offense win probabilities from an external model for the
    /// fail, xp_good and 2pt_good rows (comma separated). Without them
    /// only the projected rows are printed.
    #[arg(long, env = "TRY_WP_OFFENSE_WP", value_delimiter = ',')]
    pub offense_wp: Option<Vec<f64>>,

    /// Pretty-print JSON output
    #[arg(long, env = "TRY_WP_PRETTY", default_value = "false")]
    pub pretty: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.observation.trim().is_empty() {
            anyhow::bail!("observation path must not be empty");
        }
        if let Some(wps) = &self.offense_wp {
            if wps.len() != 3 {
                anyhow::bail!(
                    "offense_wp needs exactly 3 values (fail, xp_good, 2pt_good), got {}",
                    wps.len()
                );
            }
            if let Some(p) = wps.iter().find(|p| !(0.0..=1.0).contains(*p)) {
                anyhow::bail!("offense_wp values must be between 0.0 and 1.0, got {}", p);
            }
        }
        Ok(())
    }

    /// Base margin to evaluate: the command line wins over the value carried
    /// in the observation; one of the two is required.
    pub fn resolve_base_margin(&self, from_observation: Option<i32>) -> anyhow::Result<i32> {
        match (self.base_margin, from_observation) {
            (Some(cli), Some(json)) if cli != json => {
                warn!(
                    "Base margin {:+} from the command line overrides {:+} in the observation",
                    cli, json
                );
                Ok(cli)
            }
            (Some(m), _) | (None, Some(m)) => Ok(m),
            (None, None) => {
                anyhow::bail!("base margin is required: pass --base-margin or set base_margin")
            }
        }
    }
}
