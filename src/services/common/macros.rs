/// Creates a watch method that combines multiple stream sources into one.
///
/// This macro provides a consistent watch API for types that need to aggregate
/// multiple change streams. It takes any fields that have a `watch()` method
/// and combines them into a single stream that emits `()` whenever any field
/// changes. Callers read the fields they care about after each tick.
///
/// # Example
/// ```ignore
/// impl MyStruct {
///     pub fn watch(&self) -> impl Stream<Item = ()> + Send {
///         watch_all!(self, field1, field2, field3)
///     }
/// }
/// ```
#[macro_export]
macro_rules! watch_all {
    ($self:expr, $($source:ident),+ $(,)?) => {
        {
            use ::futures::StreamExt;

            let streams: Vec<::futures::stream::BoxStream<'static, ()>> = vec![
                $($self.$source.watch().map(|_| ()).boxed(),)+
            ];
            ::futures::stream::select_all(streams)
        }
    };
}
