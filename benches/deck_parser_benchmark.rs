//! Deck page extraction throughput
//!
//! Parses the saved fixture page and a synthetic page with a large side list.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use topdecks_scraper_lib::infrastructure::parsing::{DeckParser, HtmlParser};

const DECK_PAGE: &str = include_str!("../tests/fixtures/deck_page.html");

fn large_page(entries: usize) -> String {
    let items: String = (0..entries)
        .map(|i| format!("<li><b>{}x</b> <a>Card {i}</a></li>", i % 3 + 1))
        .collect();
    format!(
        "<html><body><div><h3><b>Big Deck</b></h3><b>Author:</b> <a>Bench</a></div>\
         <div><h4><b>Main Deck</b></h4><ul>{items}</ul></div>\
         <div><h4><b>Side Deck</b></h4><ul>{items}</ul></div></body></html>"
    )
}

fn benchmark_fixture_page(c: &mut Criterion) {
    let parser = DeckParser::new().unwrap();
    c.bench_function("parse_fixture_deck_page", |b| {
        b.iter(|| parser.parse(black_box(DECK_PAGE)).unwrap())
    });
}

fn benchmark_large_page(c: &mut Criterion) {
    let parser = DeckParser::new().unwrap();
    let page = large_page(500);
    c.bench_function("parse_large_deck_page", |b| {
        b.iter(|| parser.parse(black_box(&page)).unwrap())
    });
}

criterion_group!(benches, benchmark_fixture_page, benchmark_large_page);
criterion_main!(benches);
