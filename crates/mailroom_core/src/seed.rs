//! Demonstration donors loaded at startup.
//!
//! Seed records bypass email validation; `bill@bailey@com` is kept as-is.

use crate::repo::donor_repo::{DonorRepository, RepoResult};
use log::info;

const DEMO_DONORS: &[(&str, &str, &str, &[f64])] = &[
    ("test@test.com", "Test", "McTest", &[100.0]),
    ("uriah@mckinney.com", "Uriah", "McKinney", &[50.0, 100.0]),
    ("boris@karloff.com", "Boris", "Karloff", &[10.0, 20.0, 30.0]),
    ("rick@springfield.com", "Rick", "Springfield", &[250.0, 100.0]),
    ("bill@bailey@com", "Bill", "Bailey", &[75.0, 100.0, 80.0, 25.0]),
];

/// Inserts the demonstration donors and their donations.
///
/// Returns the number of donors inserted.
///
/// # Errors
/// - `RepoError::DuplicateEmail` when a seed email already exists.
pub fn load_demo_donors<R: DonorRepository>(repo: &mut R) -> RepoResult<usize> {
    for (email, first_name, last_name, amounts) in DEMO_DONORS {
        let donor = repo.add_donor(email, first_name, last_name)?;
        for amount in amounts.iter() {
            donor.add_donation(*amount);
        }
    }
    info!(
        "event=seed_loaded module=seed status=ok donors={}",
        DEMO_DONORS.len()
    );
    Ok(DEMO_DONORS.len())
}

#[cfg(test)]
mod tests {
    use super::load_demo_donors;
    use crate::repo::donor_repo::{DonorCollection, DonorRepository, RepoError};

    #[test]
    fn seeds_five_donors_with_donations() {
        let mut collection = DonorCollection::new();
        let inserted = load_demo_donors(&mut collection).expect("seed into empty collection");

        assert_eq!(inserted, 5);
        assert_eq!(collection.len(), 5);
        let counts: Vec<usize> = collection
            .donors()
            .iter()
            .map(|donor| donor.donation_count())
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 2, 4]);
        let boris = collection
            .find_by_email("boris@karloff.com")
            .expect("seeded donor");
        assert_eq!(boris.donation_total(), 60.0);
        assert_eq!(boris.donation_average(), 20.0);
    }

    #[test]
    fn seeding_twice_reports_duplicate() {
        let mut collection = DonorCollection::new();
        load_demo_donors(&mut collection).expect("first seed");
        let err = load_demo_donors(&mut collection).expect_err("second seed must collide");
        assert_eq!(err, RepoError::DuplicateEmail("test@test.com".to_string()));
        assert_eq!(collection.len(), 5);
    }
}
