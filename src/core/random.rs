use rand::Rng;

use crate::core::index::VerseIndex;
use crate::core::reference::VerseAddress;
use crate::utils::error::Result;

/// Picks a verse uniformly at random, from the whole index or from one book.
///
/// A book's chapter ranges are contiguous, so drawing from the span between
/// its first and last ordinal covers exactly the verses of that book.
pub fn pick_random<R: Rng + ?Sized>(
    index: &VerseIndex,
    book: Option<&str>,
    rng: &mut R,
) -> Result<VerseAddress> {
    let (start, end) = match book {
        Some(name) => index.book_range(name)?,
        None => (1, index.total_verses()),
    };

    let ordinal = rng.gen_range(start..=end);
    index.get_verse_location(ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_verse_book_always_picks_it() {
        let index = VerseIndex::builder()
            .book("genesis", "Genesis", &[3])
            .book("obadiah", "Obadiah", &[1])
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let picked = pick_random(&index, Some("Obadiah"), &mut rng).unwrap();
            assert_eq!(picked, VerseAddress::new("obadiah", 1, 1));
        }
    }
}
