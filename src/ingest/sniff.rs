use csv::ReaderBuilder;
use tracing::debug;

/// Candidate delimiters, tried in order. Ties in the score go to the
/// earlier candidate, so detection is deterministic.
pub const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How many leading records to sample per candidate.
const SAMPLE_RECORDS: usize = 20;

/// Pick the delimiter that yields the most consistent multi-column schema
/// over the leading records of `data`.
///
/// For each candidate the sample is parsed with a quote-aware reader and the
/// modal field count taken; a candidate scores the number of sample records
/// matching its mode, provided the mode is at least two columns. Highest
/// score wins, earlier candidate on ties, comma if nothing scores.
pub fn detect_delimiter(data: &[u8]) -> u8 {
    let mut best = b',';
    let mut best_score = 0usize;

    for &candidate in &CANDIDATES {
        let mut counts: Vec<usize> = Vec::with_capacity(SAMPLE_RECORDS);
        let mut rdr = ReaderBuilder::new()
            .delimiter(candidate)
            .has_headers(false)
            .flexible(true)
            .from_reader(data);
        for record in rdr.records().take(SAMPLE_RECORDS) {
            match record {
                Ok(r) => counts.push(r.len()),
                Err(_) => break,
            }
        }
        if counts.is_empty() {
            continue;
        }

        let mode = modal_count(&counts);
        if mode.0 < 2 {
            continue;
        }
        if mode.1 > best_score {
            best = candidate;
            best_score = mode.1;
        }
    }

    debug!(delimiter = %char::from(best), "detected delimiter");
    best
}

/// Returns `(field_count, occurrences)` for the most frequent field count.
/// Lower field counts win frequency ties to keep the result stable.
fn modal_count(counts: &[usize]) -> (usize, usize) {
    let mut best = (0usize, 0usize);
    for &c in counts {
        let occurrences = counts.iter().filter(|&&x| x == c).count();
        if occurrences > best.1 || (occurrences == best.1 && c < best.0) {
            best = (c, occurrences);
        }
    }
    best
}
