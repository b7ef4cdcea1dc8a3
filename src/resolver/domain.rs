//! Registrable-domain extraction.

/// Second-level public suffixes that take an extra label.
const MULTI_PART_SUFFIXES: &[&str] = &[
    "ac.jp", "ac.uk", "co.id", "co.il", "co.in", "co.jp", "co.kr", "co.nz", "co.uk", "co.za",
    "com.ar", "com.au", "com.br", "com.cn", "com.hk", "com.mx", "com.sg", "com.tr", "com.tw",
    "com.ua", "gov.uk", "net.au", "org.au", "org.uk",
];

/// Extract the host of a URL, lower-cased, without scheme, credentials or port.
pub fn host(url: &str) -> Option<String> {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority.rsplit('@').next().unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default();
    let host = host.trim_end_matches('.').to_lowercase();

    if host.is_empty() { None } else { Some(host) }
}

/// The leading label of a URL's registrable domain, lower-cased.
///
/// `http://forums.news.cnn.com/` gives `cnn`, `www.bbc.co.uk` gives `bbc`.
/// IP addresses are returned whole.
pub fn registrable_label(url: &str) -> Option<String> {
    let host = host(url)?;

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Some(host);
    }

    let labels: Vec<&str> = host
        .split('.')
        .filter(|label| !label.is_empty())
        .skip_while(|&label| label == "www")
        .collect();

    let label = match labels.len() {
        0 => return None,
        1 => labels[0],
        n => {
            let suffix = format!("{}.{}", labels[n - 2], labels[n - 1]);
            if n >= 3 && MULTI_PART_SUFFIXES.contains(&suffix.as_str()) {
                labels[n - 3]
            } else {
                labels[n - 2]
            }
        }
    };

    Some(label.to_string())
}
