/// Logs the error of a `Result` at warn level and otherwise ignores it.
///
/// For failures that are expected now and then (a full disk, a stale file) and
/// must not stop the caller
#[macro_export]
macro_rules! log_err_as_warn {
    ($result: expr) => {
        if let Err(err) = $result {
            tracing::warn!(error = ?err, "ignored failure");
        }
    };
}

/// Implements the string conversions shared by the validated text newtypes.
///
/// `$check` decides whether a candidate value is accepted. The generated
/// `TryFrom<String>` runs it before wrapping, every other conversion goes
/// through that impl or only reads the inner value.
macro_rules! validated_text {
    ($name: ident, $check: expr) => {
        impl TryFrom<String> for $name {
            type Error = $crate::errors::ConversionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                let check: fn(&str) -> Result<(), $crate::errors::ConversionError> = $check;
                check(&value).map(|()| Self(value))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::errors::ConversionError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::try_from(value.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self)
            }
        }
    };
}
pub(crate) use validated_text;
