use thiserror::Error;

pub type RulegenResult<T> = Result<T, RulegenError>;

#[derive(Error, Debug)]
pub enum RulegenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("worksheet \"{0}\" not found in workbook")]
    SheetNotFound(String),

    #[error("macro definition not found: {0}")]
    MacroNotFound(String),

    #[error("macro execution error: {0}")]
    Execution(String),
}
