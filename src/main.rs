//! Shelfmark entry point
//!
//! In the browser the page drives the `web` bindings directly. Natively this
//! opens a file-backed store and reports what it holds.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shelfmark (native) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> shelfmark::Result<()> {
    use shelfmark::format::{format_date, preview};
    use shelfmark::platform::{FileStorage, SystemClock};
    use shelfmark::{DraftStore, ReadingList, Settings};

    let dir = std::env::var("SHELFMARK_DATA_DIR").unwrap_or_else(|_| "shelfmark-data".to_owned());
    let storage = FileStorage::open(&dir)?;
    let settings = Settings::load(&storage);

    let list = ReadingList::load(storage.clone(), SystemClock);
    let stats = list.stats();
    println!(
        "Reading list: {} reading, {} completed ({}% done)",
        stats.reading, stats.completed, stats.completion_rate
    );
    for book in list.books() {
        println!(
            "  [{}] {} (added {})",
            book.priority.as_str(),
            book.title,
            format_date(&book.date_added)
        );
    }

    let drafts = DraftStore::load(storage, SystemClock);
    println!("Drafts: {}", drafts.drafts().len());
    for draft in drafts.drafts() {
        println!("  {}", preview(&draft.content, settings.preview_chars));
    }
    Ok(())
}
