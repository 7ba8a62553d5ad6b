pub mod catalog;
#[cfg(feature="system-lottery")] pub mod lottery_pity;
#[cfg(feature="system-lottery")] pub mod bucket;
#[cfg(feature="system-melt")]    pub mod melt_pity;
#[cfg(feature="system-melt")]    pub mod melt;
