// weekshare-core/src/application/orchestrator.rs

use tracing::{info, instrument, warn};

use crate::application::granter::PermissionGranter;
use crate::domain::cohort::{CohortFolderTable, week_label};
use crate::domain::error::DomainError;
use crate::domain::principal::PrincipalList;
use crate::domain::share::{ShareError, ShareOutcome, ShareRequest, ShareResult, plan_targets};
use crate::ports::folder_store::FolderStore;

/// Dependencies of one sharing run, built once per invocation.
pub struct ShareContext<'a> {
    pub store: &'a dyn FolderStore,
    pub granter: &'a PermissionGranter<'a>,
    pub folders: &'a CohortFolderTable,
    pub principals: &'a PrincipalList,
}

/// Shares the week folder of every eligible cohort with every principal.
///
/// Partial failures never abort the batch: a missing folder skips its cohort,
/// a failed grant skips that principal. Both are recorded in `errors`.
/// A cohort gets an outcome as soon as its folder is resolved.
#[instrument(skip(ctx), fields(week = request.target_week))]
pub async fn share_week_folders(ctx: &ShareContext<'_>, request: &ShareRequest) -> ShareResult {
    let mut result = ShareResult::new(request.target_week);

    let (targets, plan_errors) = plan_targets(ctx.folders, request);
    result.errors.extend(plan_errors);

    info!(
        cohorts = targets.len(),
        principals = ctx.principals.len(),
        final_week = request.is_final_week,
        "📂 Sharing week folders"
    );

    let max_attempts = ctx.granter.policy().max_attempts;

    for target in targets {
        let label = week_label(target.resolved_week);

        let folder_id = match ctx
            .store
            .find_child_folder(&target.root_folder_id, &label)
            .await
        {
            Ok(Some(id)) => id,
            Ok(None) => {
                let err = DomainError::FolderNotFound {
                    cohort: target.cohort.label.clone(),
                    week_label: label,
                };
                warn!(cohort = %target.cohort, "⚠️  {}", err);
                result.errors.push(ShareError {
                    cohort: target.cohort.label.clone(),
                    email: None,
                    message: err.to_string(),
                });
                continue;
            }
            Err(e) => {
                warn!(cohort = %target.cohort, error = %e, "⚠️  Folder lookup failed");
                result.errors.push(ShareError {
                    cohort: target.cohort.label.clone(),
                    email: None,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let mut granted = 0usize;
        for principal in ctx.principals.iter() {
            match ctx.granter.grant(&folder_id, principal, max_attempts).await {
                Ok(_) => granted += 1,
                Err(e) => {
                    warn!(cohort = %target.cohort, principal = %principal, error = %e, "❌ Grant failed");
                    result.errors.push(ShareError {
                        cohort: target.cohort.label.clone(),
                        email: Some(principal.email().to_string()),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            cohort = %target.cohort,
            week = target.resolved_week,
            granted,
            "✅ Folder shared"
        );

        result.outcomes.push(ShareOutcome {
            cohort: target.cohort.label.clone(),
            resolved_week: target.resolved_week,
            link: ctx.store.folder_link(&folder_id),
            folder_id,
        });
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::principal::Principal;
    use crate::domain::retry::RetryPolicy;
    use crate::ports::folder_store::StoreError;
    use crate::test_utils::InMemoryFolderStore;

    fn folders() -> CohortFolderTable {
        ["1기", "3기", "4기", "5기", "6기"]
            .iter()
            .map(|l| (l.to_string(), format!("root-{}", l)))
            .collect()
    }

    fn principals() -> PrincipalList {
        PrincipalList::new(vec![
            Principal::new("a@gmail.com"),
            Principal::new("b@gmail.com"),
        ])
    }

    fn store_with_weeks(weeks: &[(&str, u32)]) -> InMemoryFolderStore {
        let store = InMemoryFolderStore::default();
        for (cohort, week) in weeks {
            store.add_folder(
                &format!("root-{}", cohort),
                &week_label(*week),
                &format!("{}-w{}", cohort, week),
            );
        }
        store
    }

    fn request(week: u32, is_final_week: bool) -> ShareRequest {
        ShareRequest {
            target_week: week,
            current_cohort: 5,
            minimum_cohort: 3,
            is_final_week,
        }
    }

    async fn run(store: &InMemoryFolderStore, req: ShareRequest) -> ShareResult {
        let granter = PermissionGranter::new(store, RetryPolicy::default(), "gmail.com");
        let folders = folders();
        let principals = principals();
        let ctx = ShareContext {
            store,
            granter: &granter,
            folders: &folders,
            principals: &principals,
        };
        share_week_folders(&ctx, &req).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_current_and_older_cohorts() {
        let store = store_with_weeks(&[("3기", 5), ("4기", 5), ("5기", 4)]);
        let result = run(&store, request(4, false)).await;

        assert!(result.errors.is_empty(), "{:?}", result.errors);
        let resolved: Vec<(&str, u32)> = result
            .outcomes
            .iter()
            .map(|o| (o.cohort.as_str(), o.resolved_week))
            .collect();
        assert_eq!(resolved, vec![("3기", 5), ("4기", 5), ("5기", 4)]);
        assert_eq!(store.grants().len(), 6);
        assert_eq!(result.outcomes[2].link, "https://drive.test/5기-w4");
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_week_shares_current_cohort_only() {
        let store = store_with_weeks(&[("3기", 9), ("4기", 9), ("5기", 9)]);
        let result = run(&store, request(9, true)).await;

        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.outcomes[0].cohort, "5기");
        assert_eq!(result.outcomes[0].resolved_week, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_folder_is_recorded_and_batch_continues() {
        let store = store_with_weeks(&[("3기", 5), ("5기", 4)]);
        let result = run(&store, request(4, false)).await;

        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].cohort, "4기");
        assert!(result.errors[0].email.is_none());
        assert!(result.errors[0].message.contains("5주차"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_cohorts_never_appear() {
        let store = store_with_weeks(&[("1기", 5), ("6기", 4)]);
        let result = run(&store, request(4, false)).await;

        let seen: Vec<&str> = result
            .outcomes
            .iter()
            .map(|o| o.cohort.as_str())
            .chain(result.errors.iter().map(|e| e.cohort.as_str()))
            .collect();
        assert!(!seen.contains(&"1기"));
        assert!(!seen.contains(&"6기"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_grant_failures_are_recorded_per_principal() {
        let store = store_with_weeks(&[("5기", 4)]);
        store.fail_for("a@gmail.com", StoreError::AlreadyGranted);
        store.fail_for(
            "b@gmail.com",
            StoreError::Upstream {
                status: Some(400),
                message: "invalidSharingRequest".into(),
            },
        );

        let result = run(&store, request(4, false)).await;

        // Outcome is recorded even though no grant went through.
        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].email.as_deref(), Some("b@gmail.com"));
        assert!(
            result
                .errors
                .iter()
                .all(|e| !e.message.to_lowercase().contains("already"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_failure_is_recorded() {
        let store = store_with_weeks(&[("3기", 5), ("4기", 5), ("5기", 4)]);
        store.fail_lookup_under("root-4기");

        let result = run(&store, request(4, false)).await;
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].cohort, "4기");
    }
}
