use std::future::Future;

use shared::{
    api::payloads::{DeliveryReport, DeliveryStatus, PushPayload},
    model::PushNotificationSubscription,
};
use tracing::{debug, info, instrument, warn};
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushMessageBuilder,
};

use crate::{NotifierError, SubscriptionStore, VapidPrivateKey};

/// Delivers an encoded payload to one browser subscription
pub trait PushTransport {
    fn deliver(
        &self,
        subscription: &PushNotificationSubscription,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), NotifierError>>;
}

/// Web Push with VAPID signing
pub struct WebPushTransport {
    client: IsahcWebPushClient,
    private_key: VapidPrivateKey,
    contact: String,
}

impl WebPushTransport {
    pub fn new<S: Into<String>>(
        private_key: VapidPrivateKey,
        contact: S,
    ) -> Result<Self, NotifierError> {
        Ok(Self {
            client: IsahcWebPushClient::new()?,
            private_key,
            contact: contact.into(),
        })
    }
}

impl PushTransport for WebPushTransport {
    async fn deliver(
        &self,
        subscription: &PushNotificationSubscription,
        payload: &[u8],
    ) -> Result<(), NotifierError> {
        let info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.key,
            &subscription.auth,
        );

        let mut signature = VapidSignatureBuilder::from_pem(self.private_key.cursor(), &info)?;
        signature.add_claim("sub", self.contact.as_str());

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature.build()?);

        self.client.send(builder.build()?).await?;
        Ok(())
    }
}

/// Sends `{title, body}` notifications to the subscriptions in a store
pub struct Notifier<T> {
    transport: T,
    store: SubscriptionStore,
}

impl<T: PushTransport> Notifier<T> {
    pub fn new(transport: T, store: SubscriptionStore) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &SubscriptionStore {
        &self.store
    }

    /// Pushes to every stored subscription
    #[instrument(skip(self))]
    pub async fn send_notification(
        &self,
        title: &str,
        body: &str,
    ) -> Result<DeliveryReport, NotifierError> {
        let payload = PushPayload::new(title, body).encode()?;
        let report = self.send_to(self.store.all().iter(), &payload).await;
        Ok(report)
    }

    /// Pushes only to users with `role` who have notifications enabled
    #[instrument(skip(self))]
    pub async fn send_notification_by_role(
        &self,
        role: &str,
        title: &str,
        body: &str,
    ) -> Result<DeliveryReport, NotifierError> {
        let payload = PushPayload::new(title, body).encode()?;
        let mut report = self.send_to(self.store.for_role(role), &payload).await;
        report.target_role = Some(role.to_string());
        Ok(report)
    }

    // Failures are counted, never retried, and don't stop the rest of the batch
    async fn send_to<'a, I>(&self, subscriptions: I, payload: &[u8]) -> DeliveryReport
    where
        I: Iterator<Item = &'a PushNotificationSubscription>,
    {
        let mut report = DeliveryReport {
            status: DeliveryStatus::Sent,
            ..Default::default()
        };

        for subscription in subscriptions {
            report.attempted += 1;
            match self.transport.deliver(subscription, payload).await {
                Ok(()) => debug!("Pushed to {}", subscription.endpoint),
                Err(e) => {
                    warn!("Push failed for {}: {e}", subscription.endpoint);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Sent to {} subscriptions, {} failed",
            report.attempted, report.failed
        );
        report
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, env, path::PathBuf};

    use tokio_test::block_on;
    use web_push::WebPushError;

    use super::*;

    /// Records deliveries and fails for endpoints containing "gone"
    #[derive(Default)]
    struct FakeTransport {
        delivered: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl PushTransport for FakeTransport {
        async fn deliver(
            &self,
            subscription: &PushNotificationSubscription,
            payload: &[u8],
        ) -> Result<(), NotifierError> {
            if subscription.endpoint.contains("gone") {
                return Err(WebPushError::Unspecified.into());
            }
            self.delivered
                .borrow_mut()
                .push((subscription.endpoint.clone(), payload.to_vec()));
            Ok(())
        }
    }

    fn subscription(endpoint: &str, role: &str, enabled: bool) -> PushNotificationSubscription {
        PushNotificationSubscription {
            endpoint: endpoint.to_string(),
            key: "key".to_string(),
            auth: "auth".to_string(),
            role: Some(role.to_string()),
            notifications_enabled: enabled,
        }
    }

    fn notifier(name: &str) -> Notifier<FakeTransport> {
        let path: PathBuf =
            env::temp_dir().join(format!("notifier-push-{}-{name}.json", std::process::id()));
        let mut store = SubscriptionStore::load(path).unwrap();
        store.insert(subscription("https://push.example.com/t1", "teacher", true));
        store.insert(subscription("https://push.example.com/t2", "teacher", false));
        store.insert(subscription("https://push.example.com/s1", "student", true));
        store.insert(subscription("https://push.example.com/gone", "teacher", true));
        Notifier::new(FakeTransport::default(), store)
    }

    #[test]
    fn test_send_to_all() {
        let notifier = notifier("all");

        let report = block_on(notifier.send_notification("New Message", "Hello")).unwrap();

        assert_eq!(
            report,
            DeliveryReport {
                status: DeliveryStatus::Sent,
                target_role: None,
                attempted: 4,
                failed: 1,
            }
        );
        assert_eq!(notifier.transport.delivered.borrow().len(), 3);
    }

    #[test]
    fn test_send_by_role() {
        let notifier = notifier("role");

        let report =
            block_on(notifier.send_notification_by_role("teacher", "Alert", "Grades are in"))
                .unwrap();

        assert_eq!(report.target_role.as_deref(), Some("teacher"));
        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 1);

        let delivered = notifier.transport.delivered.borrow();
        let endpoints: Vec<_> = delivered.iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(endpoints, vec!["https://push.example.com/t1"]);
    }

    #[test]
    fn test_payload_decodes_on_the_worker_side() {
        let notifier = notifier("payload");

        block_on(notifier.send_notification("New Message", "You have 1 new message")).unwrap();

        let delivered = notifier.transport.delivered.borrow();
        let payload = PushPayload::decode(&delivered[0].1).unwrap();
        assert_eq!(
            payload,
            PushPayload::new("New Message", "You have 1 new message")
        );
    }

    #[test]
    fn test_report_serializes_like_the_api() {
        let report = DeliveryReport {
            status: DeliveryStatus::Sent,
            target_role: Some("teacher".to_string()),
            attempted: 2,
            failed: 1,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "status": "sent",
                "target_role": "teacher",
                "attempted": 2,
                "failed": 1,
            })
        );
    }
}
