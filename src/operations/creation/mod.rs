mod make_seed;

pub use make_seed::MakeSeed;
