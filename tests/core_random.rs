#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use versicle::{pick_random, AppError, Canon, VerseIndex};

    #[test]
    fn test_book_filter_stays_inside_book() {
        let index = VerseIndex::for_canon(Canon::Catholic).unwrap();
        let (start, end) = index.book_range("ruth").unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let address = pick_random(&index, Some("Ruth"), &mut rng).unwrap();
            assert_eq!(address.book, "ruth");
            let ordinal = index.ordinal_of(&address).unwrap();
            assert!(start <= ordinal && ordinal <= end);
        }
    }

    #[test]
    fn test_book_filter_reaches_every_chapter() {
        let index = VerseIndex::builder()
            .book("genesis", "Genesis", &[2, 2])
            .book("ruth", "Ruth", &[1, 1, 1])
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let chapters: HashSet<u32> = (0..200)
            .map(|_| pick_random(&index, Some("ruth"), &mut rng).unwrap())
            .inspect(|address| assert_eq!(address.book, "ruth"))
            .map(|address| address.chapter)
            .collect();
        assert_eq!(chapters, HashSet::from([1, 2, 3]));
    }

    #[test]
    fn test_unknown_book() {
        let index = VerseIndex::for_canon(Canon::Protestant).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_random(&index, Some("Tobit"), &mut rng),
            Err(AppError::BookNotFound("tobit".to_string()))
        );
    }

    #[test]
    fn test_unfiltered_pick_is_valid() {
        let index = VerseIndex::for_canon(Canon::Catholic).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let address = pick_random(&index, None, &mut rng).unwrap();
            let ordinal = index.ordinal_of(&address).unwrap();
            assert!((1..=index.total_verses()).contains(&ordinal));
        }
    }

    #[test]
    fn test_same_seed_same_pick() {
        let index = VerseIndex::for_canon(Canon::Catholic).unwrap();
        let first = pick_random(&index, None, &mut StdRng::seed_from_u64(5)).unwrap();
        let second = pick_random(&index, None, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(first, second);
    }
}
