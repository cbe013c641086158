use crate::model::TimeSlot;

/// Class name placeholder in the class template.
pub const CLASS_TOKEN: &str = "{{CLASS}}";

/// Teacher name placeholder in the teacher template.
pub const TEACHER_TOKEN: &str = "{{TEACHER}}";

/// Baseline required hours placeholder.
pub const BASE_TOKEN: &str = "{{BASE}}";

/// Actually taught hours placeholder.
pub const TOTAL_TOKEN: &str = "{{TOTAL}}";

/// Overage (total minus base) placeholder; may render negative.
pub const EXTRA_TOKEN: &str = "{{EXTRA}}";

/// `{{SD<d>P<p>}}` — subject taught at the slot, in both templates.
pub fn subject_token(slot: TimeSlot) -> String {
    format!("{{{{SD{}P{}}}}}", slot.day, slot.period)
}

/// `{{TD<d>P<p>}}` — teacher display at the slot, in the class template.
pub fn teacher_token(slot: TimeSlot) -> String {
    format!("{{{{TD{}P{}}}}}", slot.day, slot.period)
}

/// `{{CD<d>P<p>}}` — class taught at the slot, in the teacher template.
pub fn class_token(slot: TimeSlot) -> String {
    format!("{{{{CD{}P{}}}}}", slot.day, slot.period)
}
