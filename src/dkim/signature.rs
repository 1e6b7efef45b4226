use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD, Engine};

use super::{
    canonicalize,
    error::{self, Error},
    key::DkimSigningKey,
    message::{RawHeader, RawMessage, CRLF},
    DkimCanonicalizationType, DkimConfig,
};

const DKIM_SIGNATURE: &str = "DKIM-Signature";
const FROM: &str = "From";
/// Line length the signature header is folded to
const LINE_WIDTH: usize = 78;

/// Signs messages with one [`DkimConfig`]
///
/// The key is parsed once in [`DkimSigner::new`], so a signer can be built at
/// startup and shared between threads.
#[derive(Debug, Clone)]
pub struct DkimSigner {
    config: DkimConfig,
    key: DkimSigningKey,
}

impl DkimSigner {
    /// Parses the private key of `config`
    ///
    /// Fails if the key is malformed, including when it is empty, or if the
    /// configured headers do not include `From`.
    pub fn new(config: DkimConfig) -> Result<Self, Error> {
        if !config.headers().iter().any(|h| h.eq_ignore_ascii_case(FROM)) {
            return Err(error::config("the From header must be signed"));
        }

        let key = DkimSigningKey::new(config.private_key(), config.algorithm())?;
        Ok(Self { config, key })
    }

    /// The configuration this signer was built from
    pub fn config(&self) -> &DkimConfig {
        &self.config
    }

    /// Signs `message` as of the current time
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        self.sign_at(message, unix_time())
    }

    /// Signs `message` with `t=` set to `timestamp` (seconds since the epoch)
    ///
    /// Returns the `DKIM-Signature` header followed by the unchanged message.
    /// Signing an already signed message adds a second signature on top.
    pub fn sign_at(&self, message: &[u8], timestamp: u64) -> Result<Vec<u8>, Error> {
        let header = self.signature_header(message, timestamp)?;

        let mut signed = Vec::with_capacity(header.len() + message.len());
        signed.extend_from_slice(&header);
        signed.extend_from_slice(message);
        Ok(signed)
    }

    /// Builds the `DKIM-Signature` header for `message`
    ///
    /// The header is folded to lines of at most 78 characters where tag
    /// values allow it, with the message's own line ending, and terminated by
    /// that line ending.
    pub fn signature_header(&self, message: &[u8], timestamp: u64) -> Result<Vec<u8>, Error> {
        let parsed = RawMessage::parse(message)?;
        let line_ending = if parsed.line_ending == CRLF {
            "\r\n"
        } else {
            "\n"
        };
        let canonicalization = self.config.canonicalization();

        let body_hash = STANDARD.encode(sha256(&canonicalize::body(
            parsed.body,
            canonicalization.body,
        )));

        let signed = select_headers(self.config.headers(), &parsed.headers);
        if !signed.iter().any(|(name, _)| name.eq_ignore_ascii_case(FROM)) {
            return Err(error::message("message has no From header"));
        }
        let header_names = signed
            .iter()
            .map(|(name, _)| match canonicalization.header {
                DkimCanonicalizationType::Simple => (*name).to_owned(),
                DkimCanonicalizationType::Relaxed => name.to_ascii_lowercase(),
            })
            .collect::<Vec<_>>();

        let unsigned = self.folded_header(timestamp, &header_names, &body_hash, "", line_ending);

        let mut to_be_signed = Vec::new();
        for (_, header) in &signed {
            to_be_signed.extend(canonicalize::header(header, canonicalization.header));
        }
        let own = RawHeader {
            name: DKIM_SIGNATURE,
            raw: unsigned.as_bytes(),
            value: &unsigned.as_bytes()[DKIM_SIGNATURE.len() + 1..],
        };
        let own = canonicalize::header(&own, canonicalization.header);
        // the signature header is hashed without its trailing CRLF
        to_be_signed.extend_from_slice(&own[..own.len() - 2]);

        let signature = STANDARD.encode(self.key.sign(&to_be_signed)?);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            domain = self.config.domain(),
            selector = self.config.selector(),
            headers = %header_names.join(":"),
            "signed message"
        );

        let mut header =
            self.folded_header(timestamp, &header_names, &body_hash, &signature, line_ending);
        header.push_str(line_ending);
        Ok(header.into_bytes())
    }

    /// Lays out the header, `signature` being empty for the copy that is hashed
    ///
    /// Where lines break never depends on `signature`, so both copies fold the
    /// same way up to `b=`.
    fn folded_header(
        &self,
        timestamp: u64,
        header_names: &[String],
        body_hash: &str,
        signature: &str,
        line_ending: &str,
    ) -> String {
        let mut header = FoldedHeader::new(line_ending);

        let tags = [
            "v=1".to_owned(),
            format!("a={}", self.key.algorithm()),
            format!("d={}", self.config.domain()),
            format!("s={}", self.config.selector()),
            format!("c={}", self.config.canonicalization()),
            "q=dns/txt".to_owned(),
            format!("t={timestamp}"),
        ];
        for (i, tag) in tags.iter().enumerate() {
            if i > 0 {
                header.push(";");
            }
            header.space(tag.len());
            header.push(tag);
        }

        header.push(";");
        for (i, name) in header_names.iter().enumerate() {
            if i == 0 {
                header.space("h=".len() + name.len());
                header.push("h=");
            } else {
                header.push(":");
                if !header.fits(name.len() + 1) {
                    header.fold();
                }
            }
            header.push(name);
        }

        let body_hash = format!("bh={body_hash}");
        header.push(";");
        header.space(body_hash.len());
        header.push(&body_hash);

        header.push(";");
        header.space("b=".len());
        header.push("b=");
        let mut rest = signature;
        while !rest.is_empty() {
            let room = LINE_WIDTH.saturating_sub(header.column);
            if room == 0 {
                header.fold();
                continue;
            }
            let (chunk, tail) = rest.split_at(room.min(rest.len()));
            header.push(chunk);
            rest = tail;
        }

        header.out
    }
}

/// A header field being written with folding
struct FoldedHeader<'a> {
    out: String,
    column: usize,
    line_ending: &'a str,
}

impl<'a> FoldedHeader<'a> {
    fn new(line_ending: &'a str) -> Self {
        let out = format!("{DKIM_SIGNATURE}:");
        Self {
            column: out.len(),
            out,
            line_ending,
        }
    }

    fn fits(&self, len: usize) -> bool {
        self.column + len <= LINE_WIDTH
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
        self.column += s.len();
    }

    fn fold(&mut self) {
        self.out.push_str(self.line_ending);
        self.out.push(' ');
        self.column = 1;
    }

    /// Separates two tags, breaking the line when the next tag and its `;`
    /// would not fit
    fn space(&mut self, next: usize) {
        if self.fits(next + 2) {
            self.push(" ");
        } else {
            self.fold();
        }
    }
}

/// Picks, for every configured name, the bottom-most instance not picked yet
///
/// Names with no instance left are skipped.
fn select_headers<'c, 'h, 'm>(
    names: &'c [String],
    headers: &'h [RawHeader<'m>],
) -> Vec<(&'c str, &'h RawHeader<'m>)> {
    let mut used = vec![false; headers.len()];
    let mut selected = Vec::with_capacity(names.len());

    for name in names {
        let found = (0..headers.len())
            .rev()
            .find(|&i| !used[i] && headers[i].name.eq_ignore_ascii_case(name));
        if let Some(i) = found {
            used[i] = true;
            selected.push((name.as_str(), &headers[i]));
        }
    }

    selected
}

fn sha256(input: &[u8]) -> Vec<u8> {
    use sha2::{Digest, Sha256};

    Sha256::digest(input).to_vec()
}

fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dkim::{DkimCanonicalization, DkimSigningAlgorithm};

    const RSA_KEY: &str = include_str!("../../tests/data/rsa-2048.pem");

    fn signer(headers: &[&str]) -> DkimSigner {
        DkimSigner::new(DkimConfig::new(
            "ses".to_owned(),
            "example.com".to_owned(),
            RSA_KEY.to_owned(),
            headers.iter().map(|h| (*h).to_owned()).collect(),
        ))
        .unwrap()
    }

    fn header_string(signer: &DkimSigner, message: &[u8]) -> String {
        String::from_utf8(signer.signature_header(message, 1_700_000_000).unwrap()).unwrap()
    }

    fn unfolded(header: &str) -> String {
        header.replace("\r\n", "")
    }

    #[test]
    fn selects_bottom_up() {
        let message =
            RawMessage::parse(b"Received: 1\r\nFrom: a\r\nReceived: 2\r\nReceived: 3\r\n\r\n")
                .unwrap();
        let names = vec!["received".to_owned(), "From".to_owned(), "Received".to_owned()];
        let selected = select_headers(&names, &message.headers);

        let raws: Vec<&[u8]> = selected.iter().map(|(_, h)| h.raw).collect();
        assert_eq!(
            raws,
            vec![&b"Received: 3"[..], &b"From: a"[..], &b"Received: 2"[..]]
        );
    }

    #[test]
    fn missing_headers_are_left_out() {
        let header = header_string(
            &signer(&["From", "To", "Cc", "Subject"]),
            b"From: a@example.com\r\nSubject: hi\r\n\r\nbody",
        );
        assert!(header.contains("; h=from:subject;"), "{header}");
    }

    #[test]
    fn header_layout() {
        let header = header_string(
            &signer(&["From", "To", "Cc", "Subject"]),
            b"From: a@example.com\r\nTo: b@example.com\r\nSubject: hi\r\n\r\nbody",
        );

        // simple body hash of "body\r\n"
        assert!(header.starts_with(
            "DKIM-Signature: v=1; a=rsa-sha256; d=example.com; s=ses; c=relaxed/simple;\r\n \
             q=dns/txt; t=1700000000; h=from:to:subject;\r\n \
             bh=Ck5SoRNWUpSR4X0COv7R5ub2pUTtl6xz4dTFz++ji4M=; b="
        ));
        assert!(header.ends_with("=\r\n"));
        for line in header.trim_end().split("\r\n") {
            assert!(line.len() <= LINE_WIDTH, "{line}");
        }
    }

    #[test]
    fn long_header_lists_are_folded() {
        let mut names = vec!["From".to_owned()];
        let mut message = b"From: a@example.com\r\n".to_vec();
        for i in 0..60 {
            names.push(format!("X-Custom-Header-{i:02}"));
            message.extend_from_slice(format!("X-Custom-Header-{i:02}: v{i:02}\r\n").as_bytes());
        }
        message.extend_from_slice(b"\r\nbody");

        let signer = DkimSigner::new(DkimConfig::new(
            "ses".to_owned(),
            "example.com".to_owned(),
            RSA_KEY.to_owned(),
            names,
        ))
        .unwrap();
        let header = header_string(&signer, &message);

        let lines = header.trim_end().split("\r\n").collect::<Vec<_>>();
        assert!(lines.len() > 10);
        assert!(lines[0].starts_with("DKIM-Signature: "));
        for line in &lines {
            assert!(line.len() <= LINE_WIDTH, "{line}");
        }
        for line in &lines[1..] {
            assert!(line.starts_with(' '), "{line}");
        }
        assert!(unfolded(&header).contains("; h=from:x-custom-header-00:"));
        assert!(unfolded(&header).contains("x-custom-header-59; bh="));
    }

    #[test]
    fn simple_header_names_keep_case() {
        let signer = DkimSigner::new(
            DkimConfig::new(
                "ses".to_owned(),
                "example.com".to_owned(),
                RSA_KEY.to_owned(),
                vec!["From".to_owned(), "subject".to_owned()],
            )
            .with_canonicalization(DkimCanonicalization {
                header: DkimCanonicalizationType::Simple,
                body: DkimCanonicalizationType::Relaxed,
            }),
        )
        .unwrap();

        let header = unfolded(&header_string(&signer, b"From: a\r\nSubject: hi\r\n\r\n"));
        assert!(header.contains("; c=simple/relaxed; "));
        assert!(header.contains("; h=From:subject; "));
        // relaxed hash of an empty body
        assert!(header.contains("; bh=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=; "));
    }

    #[test]
    fn lf_message_gets_lf_header() {
        let header = header_string(&signer(&["From"]), b"From: a\n\nbody\n");
        assert!(header.ends_with("=\n"));
        assert!(header.contains(";\n "));
        assert!(!header.contains('\r'));
    }

    #[test]
    fn deterministic_for_fixed_time() {
        let signer = signer(&["From"]);
        let message = b"From: a\r\n\r\nbody";
        assert_eq!(
            signer.sign_at(message, 1).unwrap(),
            signer.sign_at(message, 1).unwrap()
        );
        assert_ne!(
            signer.sign_at(message, 1).unwrap(),
            signer.sign_at(message, 2).unwrap()
        );
    }

    #[test]
    fn ed25519_header() {
        let signer = DkimSigner::new(
            DkimConfig::default_config(
                "brisbane".to_owned(),
                "football.example.com".to_owned(),
                "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=".to_owned(),
            )
            .with_algorithm(DkimSigningAlgorithm::Ed25519),
        )
        .unwrap();

        let header = unfolded(&header_string(&signer, b"From: a\r\n\r\nbody"));
        assert!(header.starts_with(
            "DKIM-Signature: v=1; a=ed25519-sha256; d=football.example.com; s=brisbane; "
        ));
    }

    #[test]
    fn malformed_message_is_an_error() {
        let err = signer(&["From"])
            .sign_at(b"no colon here\r\n\r\nbody", 0)
            .unwrap_err();
        assert!(err.is_message());
    }

    #[test]
    fn from_must_be_signed() {
        let err = DkimSigner::new(DkimConfig::new(
            "ses".to_owned(),
            "example.com".to_owned(),
            RSA_KEY.to_owned(),
            vec!["Subject".to_owned()],
        ))
        .unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "invalid dkim configuration: the From header must be signed"
        );

        // any case will do
        let header = header_string(
            &signer(&["Subject", "FROM"]),
            b"From: a\r\nSubject: b\r\n\r\n",
        );
        assert!(header.contains("; h=subject:from;"));
    }

    #[test]
    fn message_without_from_is_an_error() {
        let err = signer(&["From", "Subject"])
            .sign_at(b"Subject: hi\r\n\r\nbody", 0)
            .unwrap_err();
        assert!(err.is_message());
    }

    #[test]
    fn empty_key_is_an_error() {
        let err = DkimSigner::new(DkimConfig::default_config(
            "ses".to_owned(),
            "example.com".to_owned(),
            String::new(),
        ))
        .unwrap_err();
        assert!(err.is_key());
    }
}
