use std::{error::Error, fmt};

use rayon::ThreadPoolBuildError;
use tokio::task::JoinError;

use crate::history::{ClassId, NgramHistory, Word};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, ExchangeErr>;

/// Failures raised while building statistics or running an exchange sweep.
///
/// Every variant is fatal for the sweep that produced it, partial results must be discarded.
#[derive(Debug)]
pub enum ExchangeErr {
    TooFewClasses {
        got: usize,
    },
    ClassOutOfRange {
        class: ClassId,
        num_classes: usize,
    },
    UnknownWord {
        word: Word,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    SelfMove {
        word: Word,
        class: ClassId,
    },
    NonPositiveCount {
        class: ClassId,
        history: Option<NgramHistory>,
        count: f64,
    },
    NegativeCount {
        class: ClassId,
        history: Option<NgramHistory>,
        count: f64,
    },
    InconsistentMove {
        word: Word,
        from: ClassId,
        to: ClassId,
        expected: f64,
        got: f64,
    },
    Spec(serde_json::Error),
    ThreadPool(ThreadPoolBuildError),
    Task(JoinError),
}

/// Formats the count location, the class marginal when there is no history.
fn location(class: ClassId, history: &Option<NgramHistory>) -> String {
    match history {
        Some(history) => format!("class {class} at history [{history}]"),
        None => format!("class {class}"),
    }
}

impl fmt::Display for ExchangeErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeErr::TooFewClasses { got } => {
                write!(f, "at least 2 classes are required, got {got}")
            }
            ExchangeErr::ClassOutOfRange { class, num_classes } => {
                write!(f, "class {class} is out of range, there are {num_classes} classes")
            }
            ExchangeErr::UnknownWord { word } => {
                write!(f, "word '{word}' is not part of the clustered vocabulary")
            }
            ExchangeErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch in {what}: got {got}, expected {expected}"),
            ExchangeErr::SelfMove { word, class } => {
                write!(f, "cannot move word '{word}' into its own class {class}")
            }
            ExchangeErr::NonPositiveCount {
                class,
                history,
                count,
            } => write!(
                f,
                "effective count of {} must be positive, got {count}",
                location(*class, history)
            ),
            ExchangeErr::NegativeCount {
                class,
                history,
                count,
            } => write!(
                f,
                "effective count of {} became negative: {count}",
                location(*class, history)
            ),
            ExchangeErr::InconsistentMove {
                word,
                from,
                to,
                expected,
                got,
            } => write!(
                f,
                "committing '{word}' from class {from} to {to} gave objective {got}, evaluation gave {expected}"
            ),
            ExchangeErr::Spec(e) => write!(f, "invalid execution spec: {e}"),
            ExchangeErr::ThreadPool(e) => write!(f, "failed to build the sweep thread pool: {e}"),
            ExchangeErr::Task(e) => write!(f, "sweep task failed: {e}"),
        }
    }
}

impl Error for ExchangeErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExchangeErr::Spec(e) => Some(e),
            ExchangeErr::ThreadPool(e) => Some(e),
            ExchangeErr::Task(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExchangeErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Spec(value)
    }
}

impl From<ThreadPoolBuildError> for ExchangeErr {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value)
    }
}

impl From<JoinError> for ExchangeErr {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}
