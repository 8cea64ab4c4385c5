//! # 寡聚体匹配
//!
//! 在候选结构中寻找 Rg 与估计值之差绝对值最小者。
//! 并列时取输入顺序中的第一个。估计值不是有限数时拒绝匹配。
//!
//! ## 依赖关系
//! - 被 `commands/estimate.rs` 调用
//! - 使用 `models/records.rs` 的 CandidateStructure

use crate::error::{Result, SizerError};
use crate::models::CandidateStructure;

/// 返回最接近的候选及其 Rg 差值
pub fn closest_candidate(
    estimated_rg: f64,
    candidates: &[CandidateStructure],
) -> Result<(&CandidateStructure, f64)> {
    if !estimated_rg.is_finite() {
        return Err(SizerError::InvalidData(format!(
            "estimated radius of gyration {} is not a finite number",
            estimated_rg
        )));
    }

    let mut iter = candidates.iter();
    let first = iter.next().ok_or(SizerError::EmptyCandidateSet)?;

    let mut best = first;
    let mut best_diff = (first.radius_gyration - estimated_rg).abs();
    for candidate in iter {
        let diff = (candidate.radius_gyration - estimated_rg).abs();
        // 严格小于：保持稳定的先到先得
        if diff < best_diff {
            best = candidate;
            best_diff = diff;
        }
    }

    Ok((best, best_diff))
}

/// 返回最接近的寡聚状态标签
pub fn match_oligomer(estimated_rg: f64, candidates: &[CandidateStructure]) -> Result<&str> {
    closest_candidate(estimated_rg, candidates).map(|(c, _)| c.oligomer.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<CandidateStructure> {
        vec![
            CandidateStructure::new("monomer", 10.0),
            CandidateStructure::new("dimer", 48.0),
            CandidateStructure::new("trimer", 100.0),
        ]
    }

    #[test]
    fn test_match_nearest() {
        assert_eq!(match_oligomer(50.0, &candidates()).unwrap(), "dimer");
        assert_eq!(match_oligomer(2.0, &candidates()).unwrap(), "monomer");
        assert_eq!(match_oligomer(500.0, &candidates()).unwrap(), "trimer");
    }

    #[test]
    fn test_match_reports_difference() {
        let pool = candidates();
        let (best, diff) = closest_candidate(50.0, &pool).unwrap();
        assert_eq!(best.oligomer, "dimer");
        assert!((diff - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_keeps_first_in_input_order() {
        let pool = vec![
            CandidateStructure::new("trimer", 30.0),
            CandidateStructure::new("monomer", 10.0),
            CandidateStructure::new("dimer", 20.0),
        ];
        // 25 与 20、30 等距
        assert_eq!(match_oligomer(25.0, &pool).unwrap(), "trimer");
        assert_eq!(match_oligomer(15.0, &pool).unwrap(), "monomer");
    }

    #[test]
    fn test_unsorted_candidates() {
        let pool = vec![
            CandidateStructure::new("4", 60.0),
            CandidateStructure::new("1", 15.0),
            CandidateStructure::new("2", 28.0),
        ];
        assert_eq!(match_oligomer(26.0, &pool).unwrap(), "2");
    }

    #[test]
    fn test_non_finite_estimate_rejected() {
        for rg in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                match_oligomer(rg, &candidates()).unwrap_err(),
                SizerError::InvalidData(_)
            ));
        }
    }

    #[test]
    fn test_empty_candidate_set() {
        assert!(matches!(
            match_oligomer(50.0, &[]).unwrap_err(),
            SizerError::EmptyCandidateSet
        ));
    }
}
