use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seacucumber::dkim::{DkimConfig, DkimSigner, DkimSigningAlgorithm};

const MESSAGE: &[u8] = b"From: Alice <alice@example.com>\r\n\
To: Bob <bob@example.org>\r\n\
Cc: Carol <carol@example.net>\r\n\
Subject: Quarterly report\r\n\
Date: Tue, 14 Nov 2023 22:13:20 +0000\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Hello Bob,\r\n\
\r\n\
the report is attached.   Numbers look good.\r\n\
\r\n\
Alice\r\n";

fn criterion_benchmark(c: &mut Criterion) {
    let rsa = DkimSigner::new(DkimConfig::default_config(
        "ses".to_owned(),
        "example.com".to_owned(),
        include_str!("../tests/data/rsa-2048.pem").to_owned(),
    ))
    .unwrap();
    c.bench_function("dkim sign rsa-sha256", |b| {
        b.iter(|| rsa.sign_at(black_box(MESSAGE), 1_700_000_000).unwrap())
    });

    let ed25519 = DkimSigner::new(
        DkimConfig::default_config(
            "ses".to_owned(),
            "example.com".to_owned(),
            "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=".to_owned(),
        )
        .with_algorithm(DkimSigningAlgorithm::Ed25519),
    )
    .unwrap();
    c.bench_function("dkim sign ed25519-sha256", |b| {
        b.iter(|| ed25519.sign_at(black_box(MESSAGE), 1_700_000_000).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
