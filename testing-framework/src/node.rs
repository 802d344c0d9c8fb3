//! Lifecycle of the local node process.

use std::{
    path::PathBuf,
    process::Stdio,
    time::Duration,
};

use antelope_common::{api::ChainInfo, config::DEFAULT_ENDPOINT, ChainClient};
use anyhow::{Context, Result};
use log::{debug, info};
use tempfile::TempDir;
use tokio::process::{Child, Command};

use crate::{
    utilities::progress::pause,
    waiters::wait_for,
};

// Single-producer developer chain with the HTTP API wide open, the same
// flags a contract developer runs by hand
const DEFAULT_ARGS: &[&str] = &[
    "-e",
    "-p",
    "eosio",
    "--plugin",
    "eosio::producer_plugin",
    "--plugin",
    "eosio::producer_api_plugin",
    "--plugin",
    "eosio::chain_api_plugin",
    "--plugin",
    "eosio::http_plugin",
    "--access-control-allow-origin",
    "*",
    "--contracts-console",
    "--http-validate-host",
    "false",
    "--verbose-http-errors",
    "--delete-all-blocks",
];

const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Node binary, found on PATH unless given as a path.
    pub binary: PathBuf,
    /// HTTP endpoint the node will answer on.
    pub endpoint: String,
    /// Where the node's stdout/stderr go.
    pub log_file: PathBuf,
    /// Chain data directory; a scratch tempdir when unset.
    pub data_dir: Option<PathBuf>,
    /// Start from the stock developer arguments. When false, only
    /// `extra_args` are passed.
    pub use_default_args: bool,
    pub extra_args: Vec<String>,
    /// How long [`NodeProcess::wait_until_ready`] keeps polling.
    pub startup_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            binary: PathBuf::from("nodeos"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_file: PathBuf::from("nodeos.log"),
            data_dir: None,
            use_default_args: true,
            extra_args: Vec::new(),
            startup_timeout: Duration::from_secs(10),
        }
    }
}

impl NodeConfig {
    /// Ignore the stock arguments and run the binary with exactly `args`.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeConfig {
            use_default_args: false,
            extra_args: args.into_iter().map(Into::into).collect(),
            ..NodeConfig::default()
        }
    }
}

/// A supervised node child process. Killed when dropped; chain data in a
/// scratch tempdir disappears with it.
#[derive(Debug)]
pub struct NodeProcess {
    child: Child,
    client: ChainClient,
    // Held so the scratch directory outlives the process
    _scratch_dir: Option<TempDir>,
}

impl NodeProcess {
    /// Launch the node with stdout/stderr redirected to the configured log
    /// file. Does not wait for the HTTP API to come up.
    pub fn spawn(config: NodeConfig) -> Result<Self> {
        let log_file = std::fs::File::create(&config.log_file).with_context(|| {
            format!("unable to create log file {}", config.log_file.display())
        })?;
        let err_file = log_file
            .try_clone()
            .context("unable to clone log file handle")?;

        let mut command = Command::new(&config.binary);
        if config.use_default_args {
            command.args(DEFAULT_ARGS);
        }

        let mut scratch_dir = None;
        match &config.data_dir {
            Some(dir) => {
                command.arg("--data-dir").arg(dir);
            }
            None if config.use_default_args => {
                let dir = TempDir::new().context("unable to create scratch data dir")?;
                command.arg("--data-dir").arg(dir.path());
                scratch_dir = Some(dir);
            }
            None => {}
        }

        command
            .args(&config.extra_args)
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(err_file))
            .kill_on_drop(true);

        debug!("starting {} -> {}", config.binary.display(), config.log_file.display());
        let child = command.spawn().with_context(|| {
            format!(
                "unable to start {}, is it installed and on PATH?",
                config.binary.display()
            )
        })?;
        info!("node started (pid {:?})", child.id());

        Ok(NodeProcess {
            child,
            client: ChainClient::new(&config.endpoint),
            _scratch_dir: scratch_dir,
        })
    }

    /// Signal any node already running on this machine (SIGINT, as a clean
    /// shutdown), wait for it to settle, then spawn a fresh one and block
    /// until its HTTP API answers.
    pub async fn restart(config: NodeConfig) -> Result<Self> {
        if terminate_existing(&config.binary) {
            pause(Duration::from_secs(1), "Killing nodeos ...", "").await;
        }

        let timeout = config.startup_timeout;
        let node = Self::spawn(config)?;
        node.wait_until_ready(timeout).await?;
        Ok(node)
    }

    /// Client pointed at this node's endpoint.
    pub fn client(&self) -> ChainClient {
        self.client.clone()
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Poll `get_info` until the node answers or `timeout` passes.
    pub async fn wait_until_ready(&self, timeout: Duration) -> Result<ChainInfo> {
        let client = self.client.clone();
        let info = wait_for(READY_POLL_INTERVAL, timeout, move || {
            let client = client.clone();
            async move { Ok(client.get_info().await.ok()) }
        })
        .await
        .context("node did not become ready")?;
        debug!(
            "node ready at head block {} on chain {}",
            info.head_block_num, info.chain_id
        );
        Ok(info)
    }

    /// Kill the child and wait for it to exit.
    pub async fn stop(&mut self) -> Result<()> {
        self.child.kill().await.context("unable to kill node")?;
        info!("node stopped");
        Ok(())
    }
}

/// SIGINT every process with the binary's name. Returns whether anything
/// matched.
pub fn terminate_existing(binary: &std::path::Path) -> bool {
    let name = binary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "nodeos".to_string());
    std::process::Command::new("pkill")
        .args(["-SIGINT", &name])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
