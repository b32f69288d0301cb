use std::collections::HashSet;

use crate::{
    catalog::Catalog,
    models::{Stats, YearRange},
};

/// Computes corpus stats over the local catalog
///
/// Entries without a year or rating are left out of the respective
/// aggregate instead of counting as zero.
pub fn compute_local_stats(catalog: &Catalog) -> Stats {
    let unique_genres: HashSet<String> = catalog
        .all()
        .iter()
        .flat_map(|drama| drama.genre_tokens())
        .collect();

    let years: Vec<i32> = catalog.all().iter().filter_map(|drama| drama.year).collect();
    let year_range = match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => Some(YearRange { min, max }),
        _ => None,
    };

    let ratings: Vec<f64> = catalog.all().iter().filter_map(|drama| drama.rating).collect();
    let avg_rating = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    Stats {
        total_dramas: catalog.len(),
        unique_genres: unique_genres.len(),
        year_range,
        avg_rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Drama;

    fn drama(title: &str, genres: &str, rating: Option<f64>, year: Option<i32>) -> Drama {
        Drama {
            rating,
            year,
            ..Drama::new(title, "", genres)
        }
    }

    #[test]
    fn test_missing_rating_excluded_from_average() {
        let catalog = Catalog::new(vec![
            drama("A", "Romance", Some(8.0), Some(2016)),
            drama("B", "Romance", None, Some(2019)),
            drama("C", "Thriller", Some(9.0), None),
        ])
        .unwrap();

        let stats = compute_local_stats(&catalog);
        assert_eq!(stats.total_dramas, 3);
        assert_eq!(stats.avg_rating, Some(8.5));
        assert_eq!(stats.year_range, Some(YearRange { min: 2016, max: 2019 }));
    }

    #[test]
    fn test_unique_genres_are_normalized() {
        let catalog = Catalog::new(vec![
            drama("A", "Romance, Drama", None, None),
            drama("B", " romance,DRAMA , Comedy", None, None),
        ])
        .unwrap();

        let stats = compute_local_stats(&catalog);
        assert_eq!(stats.unique_genres, 3);
    }

    #[test]
    fn test_empty_catalog() {
        let stats = compute_local_stats(&Catalog::default());
        assert_eq!(stats.total_dramas, 0);
        assert_eq!(stats.unique_genres, 0);
        assert_eq!(stats.year_range, None);
        assert_eq!(stats.avg_rating, None);
    }

    #[test]
    fn test_sample_catalog_stats() {
        let catalog = Catalog::sample().unwrap();
        let stats = compute_local_stats(&catalog);
        assert_eq!(stats.total_dramas, 77);
        assert_eq!(stats.year_range, Some(YearRange { min: 2009, max: 2022 }));
        assert!(stats.avg_rating.is_some());
    }
}
