// utils/reference.rs
use rand::Rng;

/// Generate a unique order reference passed to the payment gateway and used
/// for webhook correlation.
pub fn generate_order_reference() -> String {
    use rand::distr::Alphanumeric;

    let mut rng = rand::rng();
    let suffix: String = (0..10).map(|_| rng.sample(Alphanumeric) as char).collect();
    format!("PN-{}-{}", chrono::Utc::now().format("%Y%m%d"), suffix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let reference = generate_order_reference();
        assert!(reference.starts_with("PN-"));
        assert_eq!(reference.split('-').count(), 3);
    }

    #[test]
    fn test_references_unique() {
        let a = generate_order_reference();
        let b = generate_order_reference();
        assert_ne!(a, b);
    }
}
