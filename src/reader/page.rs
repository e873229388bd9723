//! Static HTML page wrapped around the rendered document

use std::io::{self, Write};

const STYLE: &str = include_str!("reader.css");

/// Full HTML document for the reader
pub fn reader_page(title: &str, body: &str) -> io::Result<String> {
    let mut page = Vec::with_capacity(STYLE.len() + body.len() + 512);

    page.write_all(b"<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n")?;
    page.write_all(b"<meta charset=\"utf-8\">\n")?;
    page.write_all(b"<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n")?;
    page.write_all(b"<title>")?;
    comrak::html::escape(&mut page, title.as_bytes())?;
    page.write_all(b"</title>\n<style>\n")?;
    page.write_all(STYLE.as_bytes())?;
    page.write_all(b"</style>\n</head>\n<body>\n<article>")?;
    page.write_all(body.as_bytes())?;
    page.write_all(b"</article>\n</body>\n</html>\n")?;

    String::from_utf8(page).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
