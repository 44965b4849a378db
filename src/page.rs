//! Static HTML gallery page.
//!
//! The page renders one `<img>` per catalog entry with `data-number` and
//! `data-filename` attributes. Its script mirrors the library: an explicit
//! `number -> selected` map, a summary rebuilt by full replacement after each
//! click, a copy button shown only while something is selected, and distinct
//! success/failure text depending on how the clipboard write settles.

use std::fmt::Write as _;
use std::fs;

use base64::{Engine as _, engine::general_purpose};

use crate::catalog::{Catalog, ImageEntry};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    /// Embed image bytes as `data:` URIs instead of linking to files.
    pub inline: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Select pictures".to_string(),
            inline: false,
        }
    }
}

const STYLE: &str = r#"
    body { font-family: sans-serif; margin: 1.5rem; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px; }
    figure { margin: 0; text-align: center; }
    figure img { width: 100%; height: auto; border: 4px solid transparent; cursor: pointer; border-radius: 4px; }
    figure img.selected { border-color: #e53e3e; }
    figcaption { font-size: 0.85rem; color: #444; }
    #summary { position: sticky; bottom: 0; background: #fff; border-top: 1px solid #ccc; padding: 0.75rem 0; }
    #copy[hidden], #status:empty { display: none; }
    #status.failed { color: #c53030; }
"#;

const SCRIPT: &str = r#"
(function () {
  const images = Array.from(document.querySelectorAll('img[data-number]'));
  const selected = new Map(images.map(img => [img.dataset.number, false]));
  const list = document.getElementById('selected-list');
  const numbers = document.getElementById('selected-numbers');
  const copy = document.getElementById('copy');
  const status = document.getElementById('status');

  function project() {
    const chosen = images.filter(img => selected.get(img.dataset.number));
    return {
      lines: chosen.map(img => '#' + img.dataset.number + ': ' + img.dataset.filename),
      numbers: chosen.map(img => img.dataset.number).join(', '),
    };
  }

  function render(summary) {
    images.forEach(img => img.classList.toggle('selected', selected.get(img.dataset.number)));
    list.replaceChildren(...summary.lines.map(line => {
      const li = document.createElement('li');
      li.textContent = line;
      return li;
    }));
    numbers.textContent = summary.numbers;
    copy.hidden = summary.lines.length === 0;
    status.textContent = '';
    status.className = '';
  }

  images.forEach(img => img.addEventListener('click', () => {
    const key = img.dataset.number;
    selected.set(key, !selected.get(key));
    render(project());
  }));

  copy.addEventListener('click', () => {
    const value = numbers.textContent;
    const failed = reason => {
      status.className = 'failed';
      status.textContent = 'Could not copy to clipboard (' + reason + '). Numbers: ' + value;
    };
    if (!navigator.clipboard || !navigator.clipboard.writeText) {
      failed('clipboard unavailable');
      return;
    }
    Promise.resolve()
      .then(() => navigator.clipboard.writeText(value))
      .then(
        () => { status.className = 'copied'; status.textContent = 'Copied to clipboard: ' + value; },
        failed
      );
  });

  render(project());
})();
"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Percent-encode each `/`-separated segment of a relative path.
fn url_path(filename: &str) -> String {
    filename
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

fn image_src(catalog: &Catalog, entry: &ImageEntry, inline: bool) -> Result<String> {
    if !inline {
        return Ok(url_path(&entry.filename));
    }
    let Some(path) = catalog.resolve(entry) else {
        log::warn!("cannot inline {}: catalog has no root", entry.filename);
        return Ok(url_path(&entry.filename));
    };
    let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(&entry.filename),
        general_purpose::STANDARD.encode(&bytes)
    ))
}

/// Render the full page for `catalog`.
///
/// # Errors
/// Only fails when `opts.inline` is set and an image file cannot be read.
pub fn render_page(catalog: &Catalog, opts: &PageOptions) -> Result<String> {
    let title = escape_html(&opts.title);
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<p>Click pictures to select them, then copy their numbers.</p>\n\
         <div class=\"grid\">\n"
    );

    for entry in catalog.entries() {
        let src = image_src(catalog, entry, opts.inline)?;
        let filename = escape_html(&entry.filename);
        let _ = writeln!(
            html,
            "<figure><img src=\"{src}\" alt=\"{filename}\" loading=\"lazy\" \
             data-number=\"{number}\" data-filename=\"{filename}\">\
             <figcaption>#{number}: {filename}</figcaption></figure>",
            src = escape_html(&src),
            number = entry.number,
        );
    }

    let _ = write!(
        html,
        "</div>\n<section id=\"summary\">\n<h2>Selected</h2>\n<ul id=\"selected-list\"></ul>\n\
         <p>Numbers: <code id=\"selected-numbers\"></code></p>\n\
         <button id=\"copy\" type=\"button\" hidden>Copy numbers</button>\n\
         <p id=\"status\" role=\"status\"></p>\n</section>\n\
         <script>{SCRIPT}</script>\n</body>\n</html>\n"
    );

    log::info!("rendered page with {} images", catalog.len());
    Ok(html)
}
