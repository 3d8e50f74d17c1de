pub mod attendance_card;
pub mod pending_summary;
pub mod quick_leave;

pub use attendance_card::AttendanceCard;
pub use pending_summary::PendingSummary;
pub use quick_leave::QuickApplyLeave;
