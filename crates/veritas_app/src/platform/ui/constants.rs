pub const BAR_WIDTH: usize = 40;
pub const PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "\
Type or paste article text; each line is appended.
  :real | :fake      load a random real/fake sample
  :clear             clear the text and any result
  :model ml|dl       choose Machine Learning or Deep Learning
  :analyze           send the text to the engine
  :health            check whether the engine is reachable
  :show              redraw the current state
  :help              this text
  :quit              exit";
