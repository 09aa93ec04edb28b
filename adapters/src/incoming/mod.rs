pub mod storage_poll;
