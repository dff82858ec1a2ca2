//! Stage snapshot model tests.

use pipescope_core::interface::stage::{StageInfo, StageState};

#[test]
fn nominal_snapshot_holds_live_instruction() {
    let info = StageInfo::nominal(0x1004);
    assert_eq!(info.pc, 0x1004);
    assert!(info.stage_valid);
    assert_eq!(info.state, StageState::None);
}

#[test]
fn unused_snapshot_holds_no_instruction() {
    let info = StageInfo::unused();
    assert!(!info.stage_valid);
    assert_eq!(info.state, StageState::Unused);
}

#[test]
fn equality_is_structural_over_all_fields() {
    assert_eq!(StageInfo::nominal(0x1000), StageInfo::nominal(0x1000));
    assert_ne!(StageInfo::nominal(0x1000), StageInfo::nominal(0x1004));
    assert_ne!(
        StageInfo::nominal(0x1000),
        StageInfo {
            pc: 0x1000,
            stage_valid: true,
            state: StageState::Stalled,
        }
    );
}

#[test]
fn default_state_is_nominal() {
    assert_eq!(StageState::default(), StageState::None);
}
