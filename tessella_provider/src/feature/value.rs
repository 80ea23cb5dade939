use std::fmt::{self, Debug, Display};

/// A single feature attribute value.
#[derive(Clone, PartialEq)]
pub enum FeatureValue {
	Bool(bool),
	Double(f64),
	Int(i64),
	Null,
	String(String),
	UInt(u64),
}

impl FeatureValue {
	/// Name of the value type, as used in layer field descriptions.
	pub fn type_name(&self) -> &'static str {
		match self {
			FeatureValue::Bool(_) => "Boolean",
			FeatureValue::Double(_) | FeatureValue::Int(_) | FeatureValue::UInt(_) => "Number",
			FeatureValue::Null => "Null",
			FeatureValue::String(_) => "String",
		}
	}
}

impl Debug for FeatureValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::Null => f.write_str("Null"),
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
		}
	}
}

impl Display for FeatureValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Double(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::Null => f.write_str("null"),
			Self::String(v) => f.write_str(v),
			Self::UInt(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for FeatureValue {
	fn from(value: &str) -> Self {
		FeatureValue::String(value.to_string())
	}
}

impl From<String> for FeatureValue {
	fn from(value: String) -> Self {
		FeatureValue::String(value)
	}
}

impl From<bool> for FeatureValue {
	fn from(value: bool) -> Self {
		FeatureValue::Bool(value)
	}
}

impl From<f64> for FeatureValue {
	fn from(value: f64) -> Self {
		FeatureValue::Double(value)
	}
}

impl From<i32> for FeatureValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			FeatureValue::Int(i64::from(value))
		} else {
			FeatureValue::UInt(u64::from(value.unsigned_abs()))
		}
	}
}

impl From<i64> for FeatureValue {
	fn from(value: i64) -> Self {
		FeatureValue::Int(value)
	}
}

impl From<u32> for FeatureValue {
	fn from(value: u32) -> Self {
		FeatureValue::UInt(u64::from(value))
	}
}

impl From<u64> for FeatureValue {
	fn from(value: u64) -> Self {
		FeatureValue::UInt(value)
	}
}

impl<T> From<Option<T>> for FeatureValue
where
	FeatureValue: From<T>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(FeatureValue::Null, FeatureValue::from)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FeatureValue::from("x"), "String(\"x\")", "x", "String")]
	#[case(FeatureValue::from(true), "Bool(true)", "true", "Boolean")]
	#[case(FeatureValue::from(1.5), "Double(1.5)", "1.5", "Number")]
	#[case(FeatureValue::from(-3), "Int(-3)", "-3", "Number")]
	#[case(FeatureValue::from(3), "UInt(3)", "3", "Number")]
	#[case(FeatureValue::from(None::<u64>), "Null", "null", "Null")]
	fn formatting(#[case] value: FeatureValue, #[case] debug: &str, #[case] display: &str, #[case] type_name: &str) {
		assert_eq!(format!("{value:?}"), debug);
		assert_eq!(value.to_string(), display);
		assert_eq!(value.type_name(), type_name);
	}
}
