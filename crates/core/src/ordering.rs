//! Natural filename ordering.
//!
//! Catalog order must be a pure function of the file name set, so position
//! cursors stay meaningful across requests. Embedded digit runs compare
//! numerically (`img2` before `img10`); everything else compares
//! case-insensitively, with the raw name as a final tie-break so the order
//! is total and deterministic.

use std::cmp::Ordering;

/// Compare two file names the way a gallery should sort them.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use pixwall_core::ordering::natural_cmp;
///
/// assert_eq!(natural_cmp("img2.png", "img10.png"), Ordering::Less);
/// assert_eq!(natural_cmp("B.png", "a.png"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();

    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let run_a = take_digit_run(&mut ca);
                    let run_b = take_digit_run(&mut cb);
                    match cmp_digit_runs(&run_a, &run_b) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }

                // Case-insensitive character comparison outside digit runs.
                let fx = x.to_lowercase();
                let fy = y.to_lowercase();
                match fx.cmp(fy) {
                    Ordering::Equal => {
                        ca.next();
                        cb.next();
                    }
                    ord => return ord,
                }
            }
        }
    }

    // Names equal under folding ("IMG.png" vs "img.png", "img01" vs "img1"):
    // fall back to the raw bytes so the order is still total.
    a.cmp(b)
}

/// Sort a list of names in place with [`natural_cmp`].
pub fn natural_sort(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            run.push(c);
            chars.next();
        } else {
            break;
        }
    }
    run
}

/// Compare two digit runs numerically without parsing into a fixed-width
/// integer (runs can be arbitrarily long).
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    match sa.len().cmp(&sb.len()) {
        Ordering::Equal => match sa.cmp(sb) {
            // Same numeric value; shorter run (fewer leading zeros) first.
            Ordering::Equal => a.len().cmp(&b.len()),
            ord => ord,
        },
        ord => ord,
    }
}
