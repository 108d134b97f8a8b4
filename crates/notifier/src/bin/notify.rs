use clap::Parser;
use notifier::{
    cli::{Cli, Command},
    Notifier, SubscriptionStore, VapidPrivateKey, WebPushTransport,
};
use shared::{configure_tracing, load_dotenv, model::PushNotificationSubscription};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing("info")?;

    let args = Cli::parse();
    debug!(?args);

    let mut store = SubscriptionStore::load(&args.subscriptions_path)?;

    match args.command {
        Command::Send { title, body, role } => {
            let private_key = VapidPrivateKey::load(&args.private_key_path)?;
            let transport = WebPushTransport::new(private_key, args.contact)?;
            let notifier = Notifier::new(transport, store);

            let report = match role {
                Some(role) => {
                    notifier
                        .send_notification_by_role(&role, &title, &body)
                        .await?
                }
                None => notifier.send_notification(&title, &body).await?,
            };

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::VapidPublicKey => {
            let private_key = VapidPrivateKey::load(&args.private_key_path)?;
            println!("{}", private_key.public_key()?.to_base64url());
        }
        Command::Subscribe {
            endpoint,
            key,
            auth,
            role,
        } => {
            let subscription = PushNotificationSubscription {
                endpoint,
                key,
                auth,
                role,
                notifications_enabled: true,
            };

            if store.insert(subscription) {
                store.save()?;
                info!("Subscription saved to {}", store.path().display());
            } else {
                warn!("Subscription already exists, not saving");
            }
        }
    }

    Ok(())
}
