use cipherforge::model::LanguageModel;
use cipherforge::playfair::{self, GridKey};
use cipherforge::scorer::Scorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn quadgram_model() -> LanguageModel {
    let table: Vec<i32> = (0..1usize << 20).map(|i| (i % 997) as i32).collect();
    LanguageModel::from_parts("abcdefghijklmnopqrstuvwxyz", 4, table).expect("valid model")
}

fn bench_score(c: &mut Criterion) {
    let model = quadgram_model();
    let scorer = Scorer::new(&model);
    let text = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG".repeat(20);

    c.bench_function("score_700_chars", |b| {
        b.iter(|| scorer.score(black_box(&text)))
    });

    let ranks: Vec<u8> = scorer
        .normalize(&text)
        .bytes()
        .map(|ch| model.rank_of(ch).unwrap())
        .collect();
    c.bench_function("score_ranks_700_chars", |b| {
        b.iter(|| scorer.score_ranks(black_box(&ranks)))
    });
}

fn bench_decrypt(c: &mut Criterion) {
    let key = GridKey::from_symbols(b"ZGPTFOIHMUWDRCNYKEQAXVSBL").expect("valid key");
    let ciphertext: Vec<u8> = b"KUDCBGSVXHWANEZMQOTFYRILP"
        .iter()
        .copied()
        .cycle()
        .take(700)
        .collect();

    c.bench_function("playfair_decrypt_700_chars", |b| {
        b.iter(|| playfair::decrypt(black_box(&key), black_box(&ciphertext), b'X'))
    });
}

criterion_group!(benches, bench_score, bench_decrypt);
criterion_main!(benches);
