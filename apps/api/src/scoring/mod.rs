// Scoring — the deterministic heuristics attached to resume documents.
// completion: the canonical 0–100 completeness percentage (single source of
// truth — create, update, and generation all call the same function).
// ats: keyword-match report of a resume against a job description.

pub mod ats;
pub mod completion;
