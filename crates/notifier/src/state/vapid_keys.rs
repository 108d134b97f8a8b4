use std::{fmt, fs, io::Cursor, path::Path};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use web_push::VapidSignatureBuilder;

use crate::NotifierError;

/// Uncompressed P-256 point browsers take as `applicationServerKey`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VapidPubKey(Vec<u8>);

impl VapidPubKey {
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// The form `PushManager.subscribe` expects
    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }
}

impl From<Vec<u8>> for VapidPubKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// PEM encoded private key used to sign VAPID claims
#[derive(Clone)]
pub struct VapidPrivateKey(Vec<u8>);

impl VapidPrivateKey {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NotifierError> {
        let path = path.as_ref();
        fs::read(path)
            .map(Self)
            .map_err(|source| NotifierError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn cursor(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes())
    }

    pub fn public_key(&self) -> Result<VapidPubKey, NotifierError> {
        let builder = VapidSignatureBuilder::from_pem_no_sub(self.cursor())?;
        Ok(builder.get_public_key().into())
    }
}

impl From<Vec<u8>> for VapidPrivateKey {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

// Never print key material
impl fmt::Debug for VapidPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VapidPrivateKey({} bytes)", self.0.len())
    }
}
