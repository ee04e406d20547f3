pub mod stage1_validate;
pub mod stage2_classify;
pub mod stage3_batch;
pub mod stage4_single;
pub mod stage5_report;
