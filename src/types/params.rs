use std::ffi::{CStr, CString};

use crate::traits::Parameter;

/// Owned, NUL-terminated text buffers for one statement's parameters.
///
/// The buffers live exactly as long as this value. [`ParamValues`] borrows from
/// it, so the borrow checker keeps the addresses valid for the duration of a
/// protocol call.
#[derive(Debug, Default)]
pub struct EncodedParams {
    buffers: Vec<CString>,
}

impl EncodedParams {
    /// Encodes parameters in order; index `i` backs placeholder `$i+1`.
    pub fn encode(params: &[&dyn Parameter]) -> Self {
        let buffers = params.iter().map(|p| encode_text(p.to_sql_text())).collect();
        Self { buffers }
    }

    /// Borrows the array of addresses, one per encoded buffer.
    pub fn values(&self) -> ParamValues<'_> {
        ParamValues {
            values: self.buffers.iter().map(CString::as_c_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

/// Address array handed to the protocol layer.
#[derive(Debug, Clone)]
pub struct ParamValues<'a> {
    values: Vec<&'a CStr>,
}

impl<'a> ParamValues<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for placeholder `$n` (1-based).
    pub fn placeholder(&self, n: usize) -> Option<&'a CStr> {
        n.checked_sub(1).and_then(|i| self.values.get(i).copied())
    }

    pub fn as_slice(&self) -> &[&'a CStr] {
        &self.values
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a CStr> + '_ {
        self.values.iter().copied()
    }
}

fn encode_text(text: String) -> CString {
    let mut bytes = text.into_bytes();
    if let Some(nul) = bytes.iter().position(|b| *b == 0) {
        bytes.truncate(nul);
    }
    // Interior NULs were removed above, so this cannot fail.
    CString::new(bytes).unwrap_or_default()
}
