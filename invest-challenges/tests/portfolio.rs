use invest_challenges::{Challenge, Investment, Solution, SolveError};
use serde_json::json;

#[test]
fn test_solution_json_shape() {
    let solution = Solution {
        names: vec!["Share-0003".to_string()],
        total_cost: 5000,
        total_profit: 14.0,
    };
    assert_eq!(
        serde_json::to_value(&solution).unwrap(),
        json!({
            "names": ["Share-0003"],
            "total_cost": 5000,
            "total_profit": 14.0
        })
    );
}

#[test]
fn test_error_messages() {
    let err = SolveError::ExhaustedResource {
        num_investments: 30,
        max_investments: 25,
    };
    assert_eq!(
        err.to_string(),
        "Catalog of 30 investments exceeds the exhaustive search limit of 25"
    );

    let challenge = Challenge::new(vec![Investment::new("A", 60, 1.0)], 50);
    let err = challenge
        .verify_solution(&Solution::from_indices(&challenge.investments, &[0]).unwrap())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invariant violated: Total cost (60) exceeded budget (50)"
    );
}
