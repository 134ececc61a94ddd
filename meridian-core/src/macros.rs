/// Clones the listed handles into a fresh scope before evaluating `$f`,
/// usually a `move` closure.
///
/// ```ignore
/// let count = Rc::new(Cell::new(0));
/// let handler = clone!(count; move |_| count.set(count.get() + 1));
/// ```
#[macro_export]
macro_rules! clone {
    ($($var:ident),+ ; $f:expr) => {{
        $(let $var = ::std::clone::Clone::clone(&$var);)+
        $f
    }};
}

/// Builds the children list for [`h`](crate::builder::h) from mixed values.
///
/// Every item goes through `Child::from`, so nodes, strings, numbers,
/// options and vectors can sit side by side.
#[macro_export]
macro_rules! children {
    () => {
        ::std::vec::Vec::<$crate::builder::Child>::new()
    };
    ($($child:expr),+ $(,)?) => {
        ::std::vec![$($crate::builder::Child::from($child)),+]
    };
}
