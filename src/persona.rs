use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const TRAINER_LABEL: &str = "🏋️‍♂️ パーソナルトレーナー";
pub const FINANCIAL_PLANNER_LABEL: &str = "💰 ファイナンシャルプランナー";

pub const TRAINER_SYSTEM_MESSAGE: &str = concat!(
    "あなたはプロのパーソナルトレーナーです。",
    "筋トレ、ダイエット、健康管理などの質問に対して、",
    "科学的根拠に基づきつつ、相手のモチベーションが上がるような元気でポジティブなアドバイスをしてください。"
);

pub const FINANCIAL_PLANNER_SYSTEM_MESSAGE: &str = concat!(
    "あなたは経験豊富なファイナンシャルプランナーです。",
    "家計管理、節約、資産運用などの質問に対して、",
    "リスクを考慮した上で、堅実で論理的、かつ具体的なアドバイスをプロフェッショナルなトーンで提供してください。"
);

/// One of the two experts a user can consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    #[default]
    Trainer,
    FinancialPlanner,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::Trainer, Persona::FinancialPlanner];

    pub fn label(self) -> &'static str {
        match self {
            Persona::Trainer => TRAINER_LABEL,
            Persona::FinancialPlanner => FINANCIAL_PLANNER_LABEL,
        }
    }

    pub fn system_message(self) -> &'static str {
        match self {
            Persona::Trainer => TRAINER_SYSTEM_MESSAGE,
            Persona::FinancialPlanner => FINANCIAL_PLANNER_SYSTEM_MESSAGE,
        }
    }

    /// Anything that is not the trainer label selects the financial planner.
    pub fn from_label(label: &str) -> Self {
        if label == TRAINER_LABEL {
            Persona::Trainer
        } else {
            Persona::FinancialPlanner
        }
    }
}

impl Serialize for Persona {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Persona {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Persona::from_label(&label))
    }
}
