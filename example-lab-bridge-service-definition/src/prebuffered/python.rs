use bitcode::{Decode, Encode};

#[derive(Encode, Decode, PartialEq, Debug, Clone)]
pub struct PythonPathValidation {
    pub valid: bool,
    pub message: Option<String>,
}

bitcode_method!(
    /// Opens a file picker; `None` when the user cancels.
    SelectPythonPath, "select-python-path", () => Option<String>
);

bitcode_method!(ValidatePythonPath, "validate-python-path", String => PythonPathValidation);
