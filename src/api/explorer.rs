use actix_web::{HttpResponse, Responder, get, web};
use std::fmt::Write;

use super::models::AppState;
use crate::ledger::Block;

const PAGE_HEAD: &str = "<!DOCTYPE html>\n<html><head><title>ChainFlux Explorer</title><style>\n\
    body { font-family: sans-serif; background: #f9f9f9; padding: 20px; }\n\
    .block { background: white; padding: 20px; margin-bottom: 20px; border-radius: 10px; box-shadow: 0 0 6px rgba(0,0,0,0.05); }\n\
    h2 { margin: 0; }\n\
    .hash { font-family: monospace; word-break: break-all; }\n\
    </style></head><body>\n<h1>🧠 ChainFlux: Narrative Blockchain</h1>\n";

/// Server-rendered chain explorer: one card per block, newest last.
#[get("/")]
pub async fn explorer(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let html = render_chain(ledger.chain());
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

fn render_chain(chain: &[Block]) -> String {
    let mut page = String::from(PAGE_HEAD);
    for block in chain {
        let _ = write!(
            page,
            "<div class=\"block\">\n\
             <h2>#{index}: {title}</h2>\n\
             <p><b>Time:</b> {time}</p>\n\
             <p><b>Links to:</b> {links:?}</p>\n\
             <p><b>Hash:</b> <span class=\"hash\">{hash}</span></p>\n\
             <p><b>Prev:</b> <span class=\"hash\">{prev}</span></p>\n\
             <p>{narrative}</p>\n\
             </div>\n",
            index = block.index,
            title = escape_html(&block.title),
            time = format_timestamp(block.timestamp),
            links = block.linked_blocks,
            hash = escape_html(&block.hash),
            prev = escape_html(&block.previous_hash),
            narrative = escape_html(&block.narrative),
        );
    }
    page.push_str("</body></html>\n");
    page
}

fn format_timestamp(ts: f64) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_chain};
    use crate::ledger::Block;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"war\" & 'peace'</b>"),
            "&lt;b&gt;&quot;war&quot; &amp; &#39;peace&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn renders_one_card_per_block() {
        let genesis = Block::genesis();
        let html = render_chain(std::slice::from_ref(&genesis));
        assert!(html.contains("#0: Genesis"));
        assert!(html.contains(&genesis.hash));
        assert_eq!(html.matches("<div class=\"block\">").count(), 1);
    }

    #[test]
    fn block_titles_cannot_inject_markup() {
        let mut block = Block::genesis();
        block.title = String::from("<script>alert(1)</script>");
        let html = render_chain(std::slice::from_ref(&block));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
