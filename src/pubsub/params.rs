use std::{
    any::Any,
    fmt::{self, Debug, Display},
    ops::Deref,
    sync::Arc,
};

use bytes::Bytes;

/// Один непрозрачный параметр публикации.
///
/// Брокер содержимое не интерпретирует: значение передаётся обработчикам по
/// ссылке как есть. Для типов, не покрытых остальными вариантами, есть
/// [`Param::Any`].
#[derive(Clone)]
pub enum Param {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Bytes),
    Any(Arc<dyn Any + Send + Sync>),
}

impl Param {
    /// Упаковывает произвольное значение в [`Param::Any`].
    pub fn any<T: Any + Send + Sync>(value: T) -> Self {
        Self::Any(Arc::new(value))
    }

    /// Пытается получить ссылку на значение внутри [`Param::Any`].
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Any(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl Debug for Param {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Self::Any(_) => f.write_str("Any(..)"),
        }
    }
}

impl Display for Param {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Bytes(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            Self::Any(_) => f.write_str("<any>"),
        }
    }
}

impl PartialEq for Param {
    /// `Any` сравнивается по указателю: содержимое брокеру неизвестно.
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Any(a), Self::Any(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Bytes> for Param {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<u8>> for Param {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

/// Упорядоченный список параметров публикации.
///
/// Полезная нагрузка брокера по умолчанию. Отображается как `[a b c]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Добавляет параметр в конец списка.
    pub fn push(
        &mut self,
        param: impl Into<Param>,
    ) {
        self.0.push(param.into());
    }

    /// Builder-вариант [`Params::push`].
    pub fn with(
        mut self,
        param: impl Into<Param>,
    ) -> Self {
        self.push(param);
        self
    }
}

impl Deref for Params {
    type Target = [Param];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Param>> for Params {
    fn from(v: Vec<Param>) -> Self {
        Self(v)
    }
}

impl FromIterator<Param> for Params {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Params {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Params {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("[")?;
        for (i, param) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str("]")
    }
}

/// Собирает [`Params`] из списка значений, конвертируемых в [`Param`].
///
/// ```
/// use fanout::{params, Param};
///
/// let p = params!["param1", 2, true];
/// assert_eq!(p.len(), 3);
/// assert_eq!(p[1], Param::Int(2));
/// assert_eq!(p.to_string(), "[param1 2 true]");
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($param:expr),+ $(,)?) => {
        $crate::Params::from(vec![$($crate::Param::from($param)),+])
    };
}
