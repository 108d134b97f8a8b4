use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[clap(name = "push notifier")]
pub struct Cli {
    /// JSON file holding the browser subscriptions to push to
    #[clap(long, env, default_value = "subscriptions.json")]
    pub subscriptions_path: PathBuf,
    #[clap(long, env, default_value = "vapid_key.pem")]
    pub private_key_path: PathBuf,
    /// VAPID `sub` claim
    #[clap(long, env, default_value = "mailto:admin@example.com")]
    pub contact: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Push a notification to every subscription, or to one role's
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Only push to users with this role who have notifications enabled
        #[arg(long)]
        role: Option<String>,
    },
    /// Print the `applicationServerKey` browsers need to subscribe, derived
    /// from the private key
    VapidPublicKey,
    /// Record a browser subscription
    Subscribe {
        #[arg(long)]
        endpoint: String,
        /// p256dh key
        #[arg(long)]
        key: String,
        #[arg(long)]
        auth: String,
        #[arg(long)]
        role: Option<String>,
    },
}
