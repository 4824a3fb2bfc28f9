
use super::*;
use crate::test_util::*;
