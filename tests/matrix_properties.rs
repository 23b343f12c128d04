//! Algebraic properties checked over seeded random matrices.

use matrix_engine::utils::{random_float_matrix, random_matrix};
use matrix_engine::{Element, Matrix, Scalar, DEFAULT_EPSILON};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLES: usize = 20;

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let a = random_matrix(&mut rng, 3, 5, -9, 9).unwrap();
        assert_eq!(a.transpose().shape(), (5, 3));
        assert_eq!(a.transpose().transpose(), a);
    }
}

#[test]
fn identity_is_neutral_for_multiplication() {
    let mut rng = StdRng::seed_from_u64(2);
    for n in 1..=5 {
        let a = random_matrix(&mut rng, n, n, -9, 9).unwrap();
        let id = Matrix::<Scalar>::identity(n).unwrap();
        assert_eq!((&a * &id).unwrap(), a);
        assert_eq!((&id * &a).unwrap(), a);
    }
}

#[test]
fn addition_is_associative() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..SAMPLES {
        let a = random_matrix(&mut rng, 2, 3, -50, 50).unwrap();
        let b = random_matrix(&mut rng, 2, 3, -50, 50).unwrap();
        let c = random_matrix(&mut rng, 2, 3, -50, 50).unwrap();
        let left = (&(&a + &b).unwrap() + &c).unwrap();
        let right = (&a + &(&b + &c).unwrap()).unwrap();
        assert_eq!(left, right);
    }
}

#[test]
fn multiplication_is_associative() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..SAMPLES {
        let a = random_float_matrix(&mut rng, 2, 3, -1.0, 1.0).unwrap();
        let b = random_float_matrix(&mut rng, 3, 4, -1.0, 1.0).unwrap();
        let c = random_float_matrix(&mut rng, 4, 2, -1.0, 1.0).unwrap();
        let left = (&(&a * &b).unwrap() * &c).unwrap();
        let right = (&a * &(&b * &c).unwrap()).unwrap();
        assert!(left.approx_equal(&right, DEFAULT_EPSILON));
    }

    // Exact for integers
    let a = random_matrix(&mut rng, 3, 3, -9, 9).unwrap();
    let b = random_matrix(&mut rng, 3, 3, -9, 9).unwrap();
    let c = random_matrix(&mut rng, 3, 3, -9, 9).unwrap();
    assert_eq!(
        (&(&a * &b).unwrap() * &c).unwrap(),
        (&a * &(&b * &c).unwrap()).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Linear algebra
// ---------------------------------------------------------------------------

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut checked = 0;
    for n in [2, 3, 4, 5] {
        for _ in 0..SAMPLES {
            let a = random_float_matrix(&mut rng, n, n, -1.0, 1.0).unwrap();
            if a.det().unwrap().magnitude() < 1e-2 {
                continue;
            }
            let product = (&a * &a.inverse().unwrap()).unwrap();
            assert!(product.approx_equal(&Matrix::identity(n).unwrap(), DEFAULT_EPSILON));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn solve_recovers_the_right_hand_side() {
    let mut rng = StdRng::seed_from_u64(6);
    for n in [2, 3, 4] {
        for _ in 0..SAMPLES {
            let a = random_float_matrix(&mut rng, n, n, -1.0, 1.0).unwrap();
            if a.det().unwrap().magnitude() < 1e-2 {
                continue;
            }
            let b = random_float_matrix(&mut rng, n, 1, -1.0, 1.0).unwrap();
            let x = a.solve(&b).unwrap();
            assert!((&a * &x).unwrap().approx_equal(&b, 1e-7));
        }
    }
}

#[test]
fn determinant_of_identity_is_one() {
    for n in 1..=6 {
        let id = Matrix::<Scalar>::identity(n).unwrap();
        assert_eq!(id.det().unwrap(), Scalar::from(1));
    }
}

#[test]
fn determinant_of_product_is_product_of_determinants() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 2..=5 {
        let a = random_matrix(&mut rng, n, n, -5, 5).unwrap();
        let b = random_matrix(&mut rng, n, n, -5, 5).unwrap();
        let ab = (&a * &b).unwrap();
        assert_eq!(
            ab.det().unwrap(),
            a.det().unwrap() * b.det().unwrap()
        );
    }
}

#[test]
fn rank_of_identity_and_zeros() {
    for n in 1..=6 {
        assert_eq!(Matrix::<Scalar>::identity(n).unwrap().rank(), n);
        assert_eq!(Matrix::<Scalar>::zeros(n, n).unwrap().rank(), 0);
    }
}

#[test]
fn rank_is_bounded_and_full_for_nonsingular_matrices() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..SAMPLES {
        let a = random_matrix(&mut rng, 3, 5, -3, 3).unwrap();
        assert!(a.rank() <= 3);

        let square = random_matrix(&mut rng, 4, 4, -3, 3).unwrap();
        if square.det().unwrap() != Scalar::from(0) {
            assert_eq!(square.rank(), 4);
            assert!(square
                .gauss_jordan()
                .approx_equal(&Matrix::identity(4).unwrap(), DEFAULT_EPSILON));
        }
    }
}
