use super::*;
use crate::error::RevGradError;
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_uniform_within_bounds() {
    let mut g = Graph::<f64>::new();
    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..50 {
        let id = uniform(&mut g, &mut rng, -1.0, 1.0, &format!("p_{}", i));
        let v = g.value(id).unwrap().as_scalar().unwrap();
        assert!((-1.0..=1.0).contains(&v));
        assert_eq!(g.op_tag(id).unwrap(), "leaf");
    }
}

#[test]
fn test_uniform_is_labeled() {
    let mut g = Graph::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0);
    let id = uniform(&mut g, &mut rng, -1.0, 1.0, "w_3");
    assert_eq!(g.label(id).unwrap(), Some("w_3"));
}

#[test]
fn test_normal_rejects_invalid_std_dev() {
    let mut g = Graph::<f64>::new();
    let mut rng = StdRng::seed_from_u64(0);
    let err = normal(&mut g, &mut rng, 0.0, -1.0, "bad").unwrap_err();
    assert!(matches!(err, RevGradError::DomainError { .. }));
}

#[test]
fn test_normal_creates_leaf() {
    let mut g = Graph::<f32>::new();
    let mut rng = StdRng::seed_from_u64(42);
    let id = normal(&mut g, &mut rng, 0.0, 0.5, "n_0").unwrap();
    assert_eq!(g.op_tag(id).unwrap(), "leaf");
    assert!(g.value(id).unwrap().as_scalar().unwrap().is_finite());
}
