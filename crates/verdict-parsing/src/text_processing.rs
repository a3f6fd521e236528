/// Expand common typographic ligatures found in PDF text.
///
/// Extractors emit whatever codepoints the document's fonts use, so a report
/// rendered with ligatures would otherwise hide tokens from the matcher.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}
