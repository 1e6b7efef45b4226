use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::Signer;
use rsa::{pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};

use super::{
    error::{self, Error},
    DkimSigningAlgorithm,
};

#[derive(Clone)]
enum InnerDkimSigningKey {
    Rsa(Box<RsaPrivateKey>),
    Ed25519(ed25519_dalek::SigningKey),
}

/// A parsed private key, ready to sign
#[derive(Clone)]
pub struct DkimSigningKey(InnerDkimSigningKey);

impl DkimSigningKey {
    /// Reads `private_key` in the format expected by `algorithm`
    ///
    /// * RSA keys are PEM, either PKCS#1 (`BEGIN RSA PRIVATE KEY`) or PKCS#8 (`BEGIN PRIVATE KEY`)
    /// * Ed25519 keys are the base64 encoded 32 byte seed
    pub fn new(private_key: &str, algorithm: DkimSigningAlgorithm) -> Result<Self, Error> {
        let private_key = private_key.trim();
        let inner = match algorithm {
            DkimSigningAlgorithm::Rsa => {
                let key = RsaPrivateKey::from_pkcs1_pem(private_key)
                    .or_else(|_| RsaPrivateKey::from_pkcs8_pem(private_key))
                    .map_err(error::key)?;
                InnerDkimSigningKey::Rsa(Box::new(key))
            }
            DkimSigningAlgorithm::Ed25519 => {
                let seed: [u8; ed25519_dalek::SECRET_KEY_LENGTH] = STANDARD
                    .decode(private_key)
                    .map_err(error::key)?
                    .try_into()
                    .map_err(|_| error::key("ed25519 key must be 32 bytes"))?;
                InnerDkimSigningKey::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed))
            }
        };

        Ok(Self(inner))
    }

    /// The algorithm this key signs with
    pub fn algorithm(&self) -> DkimSigningAlgorithm {
        match self.0 {
            InnerDkimSigningKey::Rsa(_) => DkimSigningAlgorithm::Rsa,
            InnerDkimSigningKey::Ed25519(_) => DkimSigningAlgorithm::Ed25519,
        }
    }

    /// Hashes `data` with SHA-256 and signs the digest
    pub(super) fn sign(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let digest = Sha256::digest(data);
        match &self.0 {
            InnerDkimSigningKey::Rsa(key) => key
                .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
                .map_err(error::signature),
            InnerDkimSigningKey::Ed25519(key) => Ok(key.sign(&digest).to_bytes().to_vec()),
        }
    }
}

impl fmt::Debug for DkimSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DkimSigningKey")
            .field(&self.algorithm())
            .finish()
    }
}
