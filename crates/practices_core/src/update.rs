use crate::{CrawlPhase, CrawlState, Effect, Msg, StopReason};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: CrawlState, msg: Msg) -> (CrawlState, Vec<Effect>) {
    let CrawlPhase::Running(page) = state.phase() else {
        return (state, Vec::new());
    };

    let effects = match msg {
        Msg::Start => {
            if state.awaiting().is_some() {
                return (state, Vec::new());
            }
            let mut effects = Vec::new();
            advance(&mut state, page, &mut effects);
            effects
        }
        Msg::PageExtracted {
            page: extracted,
            records,
        } => {
            if state.awaiting() != Some(extracted) {
                return (state, Vec::new());
            }
            state.end_fetch();

            if records.is_empty() {
                state.set_phase(CrawlPhase::Stopped(StopReason::EmptyPage));
                vec![Effect::Finished {
                    page,
                    reason: StopReason::EmptyPage,
                }]
            } else {
                let added = records.len();
                state.append(records);
                let mut effects = vec![Effect::PageAccepted {
                    page,
                    added,
                    total: state.records().len(),
                }];
                advance(&mut state, page + 1, &mut effects);
                effects
            }
        }
    };

    (state, effects)
}

/// Moves to `page`, passing over skipped pages, until a fetch is needed or the
/// cap is hit.
fn advance(state: &mut CrawlState, mut page: u32, effects: &mut Vec<Effect>) {
    loop {
        if page >= state.config().max_pages {
            state.set_phase(CrawlPhase::Stopped(StopReason::MaxPagesReached));
            effects.push(Effect::Finished {
                page,
                reason: StopReason::MaxPagesReached,
            });
            return;
        }
        state.set_phase(CrawlPhase::Running(page));
        if state.config().skip_pages.contains(&page) {
            effects.push(Effect::PageSkipped { page });
            page += 1;
            continue;
        }
        state.begin_fetch(page);
        effects.push(Effect::FetchPage { page });
        return;
    }
}
