/// Activity labels, the employee roster, and the output record type.
///
/// Labels are the Russian strings used by the case-processing team; the
/// CSV carries them verbatim, which is why the file is written with a BOM.
use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Serialize, Serializer};

/// Default roster every event's employee is drawn from.
pub const DEFAULT_EMPLOYEES: [&str; 8] = [
    "Иванов И.И.",
    "Петров П.П.",
    "Сидорова А.А.",
    "Кузнецов В.В.",
    "Смирнова О.Н.",
    "Васильев Д.С.",
    "Михайлова Е.Г.",
    "Новиков А.В.",
];

/// A stage in the life of a collection case.
///
/// Not every stage is emitted by the generator; the full table is kept so
/// consumers can validate `activity_type` against the complete label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    ClaimFiled,
    HearingScheduled,
    DecisionMade,
    DecisionWithTypo,
    DecisionReceived,
    WritReceived,
    /// Writ sent to the bailiff service (ФССП).
    WritSent,
    WritReturnedForCorrection,
    EnforcementOpened,
    DebtorNotified,
    DebtorPayment,
    CaseClosedPaid,
}

impl ActivityType {
    pub const ALL: [ActivityType; 12] = [
        ActivityType::ClaimFiled,
        ActivityType::HearingScheduled,
        ActivityType::DecisionMade,
        ActivityType::DecisionWithTypo,
        ActivityType::DecisionReceived,
        ActivityType::WritReceived,
        ActivityType::WritSent,
        ActivityType::WritReturnedForCorrection,
        ActivityType::EnforcementOpened,
        ActivityType::DebtorNotified,
        ActivityType::DebtorPayment,
        ActivityType::CaseClosedPaid,
    ];

    /// Human-readable label written to the `activity_type` column.
    pub fn label(self) -> &'static str {
        match self {
            ActivityType::ClaimFiled => "Подача искового заявления",
            ActivityType::HearingScheduled => "Назначено судебное заседание",
            ActivityType::DecisionMade => "Вынесено судебное решение",
            ActivityType::DecisionWithTypo => "Судебное решение с опечаткой",
            ActivityType::DecisionReceived => "Получено судебное решение",
            ActivityType::WritReceived => "Получен исполнительный лист",
            ActivityType::WritSent => "Исполнительный лист направлен в ФССП",
            ActivityType::WritReturnedForCorrection => "ИЛ возвращен на исправление",
            ActivityType::EnforcementOpened => "Возбуждено исполнительное производство",
            ActivityType::DebtorNotified => "Отправлено уведомление должнику",
            ActivityType::DebtorPayment => "Платеж от должника",
            ActivityType::CaseClosedPaid => "Дело закрыто (оплата)",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown activity type: {s}"))
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One row of the output log. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub case_id: u32,
    pub activity_type: ActivityType,
    pub activity_date: Date,
    pub employee: String,
}
