//! Image editing example - modifies an existing image with a text prompt.
//!
//! Run with: `cargo run --example edit_image -- <input_image.png> [prompt]`
//!
//! Requires `GOOGLE_API_KEY` environment variable.

use genedit::{EditSession, GeminiProvider, RequestState};

#[tokio::main]
async fn main() -> genedit::Result<()> {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().expect("Usage: edit_image <input_image.png> [prompt]");
    let prompt = args
        .next()
        .unwrap_or_else(|| "Make the colors more vibrant and add a warm sunset glow".into());

    let provider = GeminiProvider::builder().build()?;
    let mut session = EditSession::new(provider);

    session.upload(&input_path).await;
    session.set_prompt(prompt);

    if session.submit().await == &RequestState::Succeeded {
        if let Some(edited) = session.result() {
            let bytes = edited.save("edited.png")?;
            println!("Edited image saved to edited.png ({bytes} bytes)");
        }
    } else {
        eprintln!("{}", session.view());
    }

    Ok(())
}
