//! Known failure signatures left behind by crashed tool runs.

/// One recognizable failure marker and the short reason attached to the
/// resulting stage record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashSignature {
    /// Literal substring searched for in the artifact text.
    pub marker: &'static str,
    pub reason: &'static str,
}

/// Failure markers observed across the signoff/construction tool set.
/// Matched as literal substrings, first hit wins.
pub const CRASH_SIGNATURES: &[CrashSignature] = &[
    CrashSignature {
        marker: "Segmentation fault",
        reason: "segmentation fault",
    },
    CrashSignature {
        marker: "Segmentation violation",
        reason: "segmentation violation",
    },
    CrashSignature {
        marker: "*** glibc detected ***",
        reason: "heap corruption",
    },
    CrashSignature {
        marker: "Fatal error",
        reason: "tool fatal error",
    },
    CrashSignature {
        marker: "FATAL ERROR",
        reason: "tool fatal error",
    },
    CrashSignature {
        marker: "abnormal program termination",
        reason: "abnormal termination",
    },
    CrashSignature {
        marker: "unable to checkout license",
        reason: "license checkout failed",
    },
    CrashSignature {
        marker: "Lost license",
        reason: "license lost mid-run",
    },
    CrashSignature {
        marker: "killed by signal",
        reason: "killed by signal",
    },
];

/// First crash signature matched anywhere in the artifact text.
#[must_use]
pub fn match_crash(text: &str) -> Option<&'static CrashSignature> {
    CRASH_SIGNATURES.iter().find(|sig| text.contains(sig.marker))
}
