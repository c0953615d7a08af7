use std::time::Duration;

/// Сколько значение поиска должно не меняться, прежде чем уйдёт в запрос.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// Debounce поискового поля.
///
/// Каждое нажатие увеличивает поколение; UI заводит таймер на
/// [`DEBOUNCE_WINDOW`] с этим поколением и по срабатыванию вызывает
/// [`Debouncer::settle`]. Устаревшие таймеры ничего не возвращают, поэтому
/// серия быстрых нажатий даёт не больше одного запроса с последним значением.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    input: String,
    generation: u64,
    settled: String,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее значение поля, обновляется сразу.
    pub fn input_value(&self) -> &str {
        &self.input
    }

    pub fn settled_value(&self) -> &str {
        &self.settled
    }

    pub fn input(&mut self, value: impl Into<String>) -> u64 {
        self.input = value.into();
        self.generation += 1;
        self.generation
    }

    pub fn settle(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation || self.input == self.settled {
            return None;
        }
        self.settled = self.input.clone();
        Some(self.settled.clone())
    }
}
