//! Property-based tests for the symmetry invariants of the cumulants.

use hawkes_cumulants::{
    cumulants::{
        CovarianceSource, CumulantAssembler, ExecutionStrategy, WindowParameter,
        tensor::{max_asymmetry, max_cyclic_asymmetry},
        theoretical_covariance, theoretical_partial_skewness, theoretical_skewness,
    },
    process::ProcessSet,
};
use ndarray::{Array1, Array2};
use proptest::prelude::*;

fn process_set_strategy() -> impl Strategy<Value = ProcessSet> {
    prop::collection::vec(prop::collection::vec(0.0f64..100.0, 0..25), 1..=3).prop_map(|raw| {
        ProcessSet::from_unsorted(raw).expect("finite, non-negative timestamps are always valid")
    })
}

fn reference_strategy() -> impl Strategy<Value = (Array1<f64>, Array2<f64>)> {
    (1usize..=4).prop_flat_map(|d| {
        (
            prop::collection::vec(0.01f64..5.0, d),
            prop::collection::vec(-1.0f64..2.0, d * d),
        )
            .prop_map(move |(l, r)| {
                (Array1::from(l), Array2::from_shape_vec((d, d), r).expect("d*d entries"))
            })
    })
}

fn tolerance(values: impl Iterator<Item = f64>) -> f64 {
    1e-9 * (1.0 + values.fold(0.0_f64, |m, v| m.max(v.abs())))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn covariance_is_symmetric_for_any_process_set(
        processes in process_set_strategy(), h in 0.5f64..30.0,
    ) {
        let mut a = CumulantAssembler::new(
            processes, WindowParameter::Scalar(h), ExecutionStrategy::FanOut,
        ).expect("valid window");
        prop_assert!(a.compute_c(CovarianceSource::Direct).is_ok());
        prop_assert_eq!(max_asymmetry(a.c().expect("C computed")), 0.0);
        prop_assert!(a.compute_b().is_ok());
        prop_assert_eq!(max_asymmetry(a.b().expect("B computed")), 0.0);
    }

    #[test]
    fn skewness_is_cyclic_for_any_process_set(
        processes in process_set_strategy(), h in 0.5f64..30.0,
    ) {
        let mut a = CumulantAssembler::new(
            processes, WindowParameter::Scalar(h), ExecutionStrategy::Sequential,
        ).expect("valid window");
        let run = a.run_full();
        prop_assert!(run.is_ok(), "full pipeline failed: {:?}", run.err());
        let k = a.k().expect("K computed");
        prop_assert!(max_cyclic_asymmetry(k) <= tolerance(k.iter().copied()));
    }

    #[test]
    fn strategies_agree_for_any_process_set(
        processes in process_set_strategy(), h in 0.5f64..30.0,
    ) {
        let mut seq = CumulantAssembler::new(
            processes.clone(), WindowParameter::Scalar(h), ExecutionStrategy::Sequential,
        ).expect("valid window");
        let mut fan = CumulantAssembler::new(
            processes, WindowParameter::Scalar(h), ExecutionStrategy::FanOut,
        ).expect("valid window");
        prop_assert!(seq.run_partial().is_ok());
        prop_assert!(fan.run_partial().is_ok());
        prop_assert_eq!(seq.c().expect("C"), fan.c().expect("C"));
        prop_assert_eq!(seq.k_part().expect("K_part"), fan.k_part().expect("K_part"));
    }

    #[test]
    fn theoretical_partial_skewness_is_a_slice_of_the_tensor(
        (l, r) in reference_strategy(),
    ) {
        let c_th = theoretical_covariance(&l, &r);
        prop_assert!(max_asymmetry(&c_th) <= tolerance(c_th.iter().copied()));

        let k_th = theoretical_skewness(&l, &c_th, &r);
        let k_part_th = theoretical_partial_skewness(&l, &c_th, &r);
        let tol = tolerance(k_th.iter().copied());
        prop_assert!(max_cyclic_asymmetry(&k_th) <= tol);
        let d = l.len();
        for i in 0..d {
            for j in 0..d {
                prop_assert!((k_part_th[[i, j]] - k_th[[i, i, j]]).abs() <= tol);
            }
        }
    }
}
