//! 文本提取服务
//!
//! 把从表格里复制粘贴的松散文本解析成计数记录和订单。
//! 输入不可控，无法识别的行一律跳过，从不报错。

use crate::config::{Config, ORDER_ID_LEN};
use crate::error::{AppResult, ConfigError};
use crate::models::{CountRecord, HistoryLedger, Order, PriorityRules, WorkerId};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// 取消/不适用标记（大写比较）
const CANCEL_MARKERS: [&str; 3] = ["CANCELAD", "N/A", "NO APLICA"];

/// 文本提取服务
pub struct TextExtractor {
    /// `整数 + 非数字分隔符 + 整数`
    pair_re: Regex,
    number_re: Regex,
    order_re: Regex,
    roster: BTreeSet<WorkerId>,
    rules: PriorityRules,
}

impl TextExtractor {
    /// 按配置创建提取服务
    pub fn new(config: &Config) -> AppResult<Self> {
        config.validate()?;
        let id_tail = ORDER_ID_LEN - config.order_prefix.len();
        let order_pattern = format!(
            r"(?:^|\D)({}\d{{{}}})\s*(\d{{1,2}})\s*(\d+)",
            regex::escape(&config.order_prefix),
            id_tail
        );

        Ok(Self {
            pair_re: Regex::new(r"(\d+)\D+(\d+)").map_err(ConfigError::from)?,
            number_re: Regex::new(r"\d+").map_err(ConfigError::from)?,
            order_re: Regex::new(&order_pattern).map_err(ConfigError::from)?,
            roster: config.roster.iter().copied().collect(),
            rules: config.priority.clone(),
        })
    }

    /// 把整段文本解析成一条计数记录
    ///
    /// 每行取最后两个数字作为 (编号, 订单数)，不在名单中的编号被丢弃
    pub fn parse_counts(&self, text: &str) -> CountRecord {
        let mut record = CountRecord::new();
        for line in text.lines() {
            if let Some((worker, count)) = self.parse_count_line(line) {
                record.insert(worker, count);
            }
        }
        record
    }

    /// 把历史文本解析成历史记录，每个非空行是一个周期
    pub fn parse_history(&self, text: &str) -> HistoryLedger {
        let mut ledger = HistoryLedger::default();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let mut matched = false;
            let mut record = CountRecord::new();
            for caps in self.pair_re.captures_iter(line) {
                matched = true;
                if let Some((worker, count)) = self.roster_pair(&caps[1], &caps[2]) {
                    record.insert(worker, count);
                }
            }

            if matched {
                ledger.push(record);
            } else {
                debug!("跳过无法识别的历史行: {:?}", line);
            }
        }
        ledger
    }

    /// 解析订单文本，保持原始顺序，重复的订单号只保留第一次出现
    pub fn parse_orders(&self, text: &str) -> Vec<Order> {
        let mut seen = HashSet::new();
        let mut orders = Vec::new();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let upper = line.to_uppercase();
            if CANCEL_MARKERS.iter().any(|m| upper.contains(m)) {
                debug!("跳过取消/不适用订单行: {:?}", line);
                continue;
            }

            match self.parse_order_line(line) {
                Some(order) => {
                    if seen.insert(order.id.clone()) {
                        orders.push(order);
                    } else {
                        debug!("重复订单 {}，忽略", order.id);
                    }
                }
                None => debug!("跳过无法识别的订单行: {:?}", line),
            }
        }

        orders
    }

    fn parse_count_line(&self, line: &str) -> Option<(WorkerId, u32)> {
        if !self.pair_re.is_match(line) {
            return None;
        }
        let numbers: Vec<&str> = self.number_re.find_iter(line).map(|m| m.as_str()).collect();
        let [.., id, count] = numbers.as_slice() else {
            return None;
        };
        self.roster_pair(id, count)
    }

    fn roster_pair(&self, id: &str, count: &str) -> Option<(WorkerId, u32)> {
        let worker: WorkerId = id.parse().ok()?;
        let count: u32 = count.parse().ok()?;
        if !self.roster.contains(&worker) {
            debug!("编号 {} 不在名单中，忽略", worker);
            return None;
        }
        Some((worker, count))
    }

    /// 解析单行订单
    ///
    /// 两位优先级不是已知代码时，把第一位当优先级，第二位并回件数
    /// （处理列之间没有分隔符的粘贴）
    fn parse_order_line(&self, line: &str) -> Option<Order> {
        let caps = self.order_re.captures(line)?;
        let id = &caps[1];
        let priority_digits = &caps[2];
        let items_digits = &caps[3];

        let direct: u8 = priority_digits.parse().ok()?;
        let (priority, items) = if self.rules.is_known(direct) {
            (direct, items_digits.to_string())
        } else if priority_digits.len() == 2 {
            let (first, second) = priority_digits.split_at(1);
            let priority: u8 = first.parse().ok()?;
            if !self.rules.is_known(priority) {
                return None;
            }
            debug!(
                "订单 {} 优先级 {} 无效，按 {} 重新解读",
                id, priority_digits, priority
            );
            (priority, format!("{}{}", second, items_digits))
        } else {
            return None;
        };

        let item_count: u32 = items.parse().ok()?;
        if item_count == 0 {
            return None;
        }

        Some(Order::new(id, priority, item_count))
    }
}
