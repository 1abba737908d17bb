use clap::{arg, Arg, ArgAction, Command};
use hns_consensus_core::{config::params::Params, NetworkType};
use serde::Deserialize;
use std::{ffi::OsString, fs};
use toml::from_str;

/// What to assemble, and for which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Renew(String),
    Finalize(String),
}

impl Action {
    pub fn name(&self) -> &str {
        match self {
            Action::Renew(name) | Action::Finalize(name) => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Args {
    // NOTE: property names match config file fields
    pub testnet: bool,
    pub regtest: bool,
    pub simnet: bool,
    #[serde(rename = "nodeurl")]
    pub node_url: Option<String>,
    #[serde(rename = "walleturl")]
    pub wallet_url: Option<String>,
    #[serde(rename = "apikey")]
    pub api_key: Option<String>,
    #[serde(rename = "walletid")]
    pub wallet_id: Option<String>,
    pub passphrase: Option<String>,
    pub rate: Option<u64>,
    pub broadcast: bool,
    #[serde(rename = "loglevel")]
    pub log_level: String,
    pub logdir: Option<String>,

    #[serde(skip)]
    pub action: Option<Action>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            testnet: false,
            regtest: false,
            simnet: false,
            node_url: None,
            wallet_url: None,
            api_key: None,
            wallet_id: None,
            passphrase: None,
            rate: None,
            broadcast: false,
            log_level: "info".into(),
            logdir: None,
            action: None,
        }
    }
}

impl Args {
    pub fn network(&self) -> NetworkType {
        match (self.testnet, self.regtest, self.simnet) {
            (true, _, _) => NetworkType::Testnet,
            (_, true, _) => NetworkType::Regtest,
            (_, _, true) => NetworkType::Simnet,
            _ => NetworkType::Main,
        }
    }

    pub fn params(&self) -> &'static Params {
        Params::of(self.network())
    }

    pub fn node_url(&self) -> String {
        self.node_url.clone().unwrap_or_else(|| format!("http://127.0.0.1:{}", self.network().default_rpc_port()))
    }

    pub fn wallet_url(&self) -> String {
        self.wallet_url.clone().unwrap_or_else(|| format!("http://127.0.0.1:{}", self.network().default_wallet_port()))
    }
}

pub fn cli() -> Command {
    let name_arg = || Arg::new("name").required(true).value_parser(clap::value_parser!(String)).help("Name to operate on.");

    #[allow(clippy::let_and_return)]
    let cmd = Command::new("renewer")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg(arg!(-C --configfile <CONFIG_FILE> "Path of config file."))
        .arg(arg!(--logdir <LOG_DIR> "Directory to log output."))
        .arg(
            Arg::new("log_level")
                .short('d')
                .long("loglevel")
                .env("RENEWER_LOG_LEVEL")
                .value_name("LEVEL")
                .default_value("info")
                .require_equals(true)
                .help("Logging level for all subsystems {off, error, warn, info, debug, trace}\n-- You may also specify <subsystem>=<level>,<subsystem2>=<level>,... to set the log level for individual subsystems.".to_string()),
        )
        .arg(arg!(--testnet "Use the test network"))
        .arg(arg!(--regtest "Use the regression test network"))
        .arg(arg!(--simnet "Use the simulation test network"))
        .arg(
            Arg::new("nodeurl")
                .long("nodeurl")
                .env("RENEWER_NODE_URL")
                .value_name("URL")
                .require_equals(true)
                .value_parser(clap::value_parser!(String))
                .help("Node HTTP endpoint (default: http://127.0.0.1:<network rpc port>)."),
        )
        .arg(
            Arg::new("walleturl")
                .long("walleturl")
                .env("RENEWER_WALLET_URL")
                .value_name("URL")
                .require_equals(true)
                .value_parser(clap::value_parser!(String))
                .help("Wallet HTTP endpoint (default: http://127.0.0.1:<network wallet port>)."),
        )
        .arg(
            Arg::new("apikey")
                .long("apikey")
                .env("RENEWER_API_KEY")
                .value_name("KEY")
                .require_equals(true)
                .hide_env_values(true)
                .value_parser(clap::value_parser!(String))
                .help("API key of the node and wallet servers."),
        )
        .arg(
            Arg::new("walletid")
                .long("walletid")
                .env("RENEWER_WALLET_ID")
                .value_name("ID")
                .require_equals(true)
                .value_parser(clap::value_parser!(String))
                .help("Wallet to fund from (default: the server's current wallet)."),
        )
        .arg(
            Arg::new("passphrase")
                .long("passphrase")
                .env("RENEWER_PASSPHRASE")
                .value_name("PASSPHRASE")
                .require_equals(true)
                .hide_env_values(true)
                .value_parser(clap::value_parser!(String))
                .help("Passphrase unlocking the wallet before key export."),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .env("RENEWER_RATE")
                .value_name("RATE")
                .require_equals(true)
                .value_parser(clap::value_parser!(u64))
                .help("Fee rate in subunits per kvB (default: the network fee rate)."),
        )
        .arg(
            Arg::new("broadcast")
                .long("broadcast")
                .env("RENEWER_BROADCAST")
                .action(ArgAction::SetTrue)
                .help("Submit the signed transaction and check that it reached the mempool."),
        )
        .subcommand(Command::new("renew").about("Renew a name held by the anyone-can-renew script.").arg(name_arg()))
        .subcommand(Command::new("finalize").about("Finalize a transfer out of a HIP-1 script address.").arg(name_arg()));

    cmd
}

pub fn parse_args() -> Args {
    match Args::parse(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => err.exit(),
    }
}

impl Args {
    pub fn parse<I, T>(itr: I) -> Result<Args, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let m: clap::ArgMatches = cli().try_get_matches_from(itr)?;
        let mut defaults: Args = Default::default();

        if let Some(config_file) = m.get_one::<String>("configfile") {
            let config_str = fs::read_to_string(config_file)?;
            defaults = from_str(&config_str).map_err(|toml_error| {
                clap::Error::raw(
                    clap::error::ErrorKind::ValueValidation,
                    format!("failed parsing config file, reason: {}", toml_error.message()),
                )
            })?;
        }

        let action = match m.subcommand() {
            Some(("renew", sub)) => Action::Renew(sub.get_one::<String>("name").cloned().unwrap_or_default()),
            Some(("finalize", sub)) => Action::Finalize(sub.get_one::<String>("name").cloned().unwrap_or_default()),
            _ => return Err(clap::Error::raw(clap::error::ErrorKind::MissingSubcommand, "expected `renew` or `finalize`\n")),
        };

        // a network flag on the command line replaces the one of the config file
        let cli_network = ["testnet", "regtest", "simnet"].iter().any(|id| m.get_flag(id));
        let (testnet, regtest, simnet) = match cli_network {
            true => (m.get_flag("testnet"), m.get_flag("regtest"), m.get_flag("simnet")),
            false => (defaults.testnet, defaults.regtest, defaults.simnet),
        };
        if [testnet, regtest, simnet].iter().filter(|&&flag| flag).count() > 1 {
            return Err(clap::Error::raw(clap::error::ErrorKind::ArgumentConflict, "only a single net should be activated\n"));
        }

        let args = Args {
            testnet,
            regtest,
            simnet,
            node_url: m.get_one::<String>("nodeurl").cloned().or(defaults.node_url),
            wallet_url: m.get_one::<String>("walleturl").cloned().or(defaults.wallet_url),
            api_key: m.get_one::<String>("apikey").cloned().or(defaults.api_key),
            wallet_id: m.get_one::<String>("walletid").cloned().or(defaults.wallet_id),
            passphrase: m.get_one::<String>("passphrase").cloned().or(defaults.passphrase),
            rate: m.get_one::<u64>("rate").cloned().or(defaults.rate),
            broadcast: m.get_flag("broadcast") || defaults.broadcast,
            log_level: arg_match_unwrap_or::<String>(&m, "log_level", defaults.log_level),
            logdir: m.get_one::<String>("logdir").cloned().or(defaults.logdir),
            action: Some(action),
        };

        Ok(args)
    }
}

use clap::parser::ValueSource::DefaultValue;
use std::marker::{Send, Sync};
fn arg_match_unwrap_or<T: Clone + Send + Sync + 'static>(m: &clap::ArgMatches, arg_id: &str, default: T) -> T {
    m.get_one::<T>(arg_id).cloned().filter(|_| m.value_source(arg_id) != Some(DefaultValue)).unwrap_or(default)
}
