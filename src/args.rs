use clap::Parser;
use github_client::DEFAULT_USER_AGENT;
use org_stats::{JitterPolicy, RetryPolicy, Scope, StatsFetcher};
use secrecy::SecretString;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
    time::Duration,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub user name
    pub username: String,

    /// GitHub password or personal access token
    pub secret: SecretString,

    /// Organization to scan
    pub org: String,

    /// Repositories to scan: public (pub), private (pvt) or all
    #[clap(default_value = "public")]
    pub scope: Scope,

    /// Repository API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// User-Agent header sent with every request
    #[clap(long, env, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Seconds to wait before asking again for stats GitHub is still computing
    #[clap(long, env, default_value_t = 5)]
    pub retry_delay_secs: u64,

    /// Stats requests per repository before skipping it, 0 waits forever
    #[clap(long, env, default_value_t = 60)]
    pub max_attempts: u32,

    /// Upper bound of the random pause before each repository, in seconds
    #[clap(long, env, default_value_t = 4, parse(try_from_str=max_jitter_in_range))]
    pub max_jitter_secs: u64,

    /// Print totals as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

impl Args {
    pub fn stats_fetcher(&self) -> StatsFetcher {
        let backoff = Duration::from_secs(self.retry_delay_secs);
        let retry = match self.max_attempts {
            0 => RetryPolicy::unbounded(backoff),
            max => RetryPolicy::new(backoff, Some(max)),
        };
        let jitter = match self.max_jitter_secs {
            0 => JitterPolicy::none(),
            max => JitterPolicy::new(max),
        };
        StatsFetcher::new(retry, jitter)
    }
}

fn max_jitter_in_range(value: &str) -> clap::Result<u64, String> {
    number_in_range(value, 0, 60, "max_jitter_secs".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}
